use std::time::Duration;

/// A recorded value for events whose only information is that they happened.
///
/// Record one of these each time an instrumented function is called.
///
/// ```
/// use measurements::{FunctionCall, Session};
///
/// let session = Session::new();
/// session.record("handle_request", FunctionCall);
///
/// assert_eq!(session.fetch::<FunctionCall>("handle_request").unwrap().len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct FunctionCall;

/// A recorded value for events that recur over time, such as ticks of a timer or frames.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct PeriodicEvent;

/// A recorded value holding how long a function took to run.
///
/// See [`Session::measure_elapsed()`][crate::Session::measure_elapsed] for recording these
/// automatically.
pub type FunctionTiming = Duration;
