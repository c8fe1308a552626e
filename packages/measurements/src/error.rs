use thiserror::Error;

use crate::ScopeMode;

/// Errors that can occur when reading measurements from a [`Registry`][crate::Registry].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A read used the wrong thread scope for a name. Names that are split by thread must be
    /// read per thread, all other names must be read as a whole.
    #[error("measurements named '{name}' are recorded {mode}, which this read does not support")]
    InvalidMode {
        /// The name whose measurements were requested.
        name: String,

        /// The mode the name was actually in when the read was attempted.
        mode: ScopeMode,
    },
}

/// A specialized `Result` type for measurement reads, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn invalid_mode_names_the_actual_mode() {
        let error = Error::InvalidMode {
            name: "frame_time".to_string(),
            mode: ScopeMode::PerThread,
        };

        let message = error.to_string();
        assert!(message.contains("frame_time"));
        assert!(message.contains("per thread"));
    }
}
