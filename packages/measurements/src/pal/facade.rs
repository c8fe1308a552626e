//! Platform facade for switching between real and fake implementations.

use std::time::Instant;

use crate::pal::abstractions::Platform;
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Facade that allows switching between real and fake platform implementations.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    /// Real platform implementation using the system clock.
    Real(RealPlatform),

    /// Fake platform implementation for testing.
    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Creates a new platform facade using the real implementation.
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform)
    }

    /// Creates a new platform facade using the fake implementation.
    #[cfg(test)]
    pub(crate) fn fake(fake_platform: FakePlatform) -> Self {
        Self::Fake(fake_platform)
    }
}

impl Platform for PlatformFacade {
    fn now(&self) -> Instant {
        match self {
            Self::Real(platform) => platform.now(),
            #[cfg(test)]
            Self::Fake(platform) => platform.now(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn real_facade_uses_real_platform() {
        let facade = PlatformFacade::real();
        assert!(matches!(facade, PlatformFacade::Real(_)));
    }

    #[test]
    fn fake_facade_reads_fake_clock() {
        let fake_platform = FakePlatform::new();
        let facade = PlatformFacade::fake(fake_platform.clone());

        let before = facade.now();
        fake_platform.advance(Duration::from_millis(300));

        assert_eq!(facade.now().duration_since(before), Duration::from_millis(300));
    }
}
