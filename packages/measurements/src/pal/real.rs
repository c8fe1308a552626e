//! Real platform implementation backed by the monotonic system clock.

use std::time::Instant;

use crate::pal::abstractions::Platform;

/// Reads timestamps from [`Instant::now()`].
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Any replacement instant is indistinguishable in tests.
    fn now(&self) -> Instant {
        Instant::now()
    }
}
