//! Fake platform implementation for testing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// The clock stands still until a test moves it forward. Multiple clones of the same
/// `FakePlatform` share the same clock, so tests can advance time after handing a clone
/// to the code under test.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<Instant>>,
}

impl FakePlatform {
    /// Creates a fake clock that starts at the current real time.
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward. This affects all clones of this platform.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now
            .checked_add(by)
            .expect("fake clock advanced beyond the representable range");
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn clock_stands_still_until_advanced() {
        let platform = FakePlatform::new();

        assert_eq!(platform.now(), platform.now());
    }

    #[test]
    fn shared_clock_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        let start = platform2.now();
        platform1.advance(Duration::from_millis(100));

        assert_eq!(platform2.now().duration_since(start), Duration::from_millis(100));
    }
}
