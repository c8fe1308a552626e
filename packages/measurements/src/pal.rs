//! Platform abstraction layer for reading the clock.
//!
//! This module provides a platform abstraction that allows switching between
//! the real monotonic clock and a fake clock that tests can move forward manually.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
