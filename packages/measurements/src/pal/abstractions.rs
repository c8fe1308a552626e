//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Instant;

/// Provides the timestamps attached to recorded measurements.
///
/// This trait abstracts the clock so that tests can control exactly which
/// timestamp each measurement receives.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Reads the monotonic clock.
    fn now(&self) -> Instant;
}
