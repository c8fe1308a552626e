use thiserror::Error;

/// Errors that can occur when accessing a [`BoundedHistory`][crate::BoundedHistory].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for an element older than the oldest element in the history.
    #[error("age {age} is out of range for a history holding {len} elements")]
    OutOfRange {
        /// The age that was requested.
        age: usize,

        /// The number of elements in the history at the time of the request.
        len: usize,
    },
}

/// A specialized `Result` type for history operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
