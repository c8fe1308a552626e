//! Scoped wall time measurement.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::Registry;
use crate::pal::Platform;

/// Records the wall time elapsed between its creation and drop.
///
/// The elapsed time is recorded under the span's name in the [`Registry`] that created it, with
/// the timestamp of the moment the span was dropped.
///
/// # Examples
///
/// ```
/// use measurements::{FunctionTiming, Session};
///
/// let session = Session::new();
///
/// fn parse_input(session: &Session) {
///     let _span = session.measure_elapsed("parse_input");
///     // Work happens here.
/// }
///
/// parse_input(&session);
/// parse_input(&session);
///
/// let timings = session.fetch::<FunctionTiming>("parse_input").unwrap();
/// assert_eq!(timings.len(), 2);
/// ```
#[derive(Debug)]
#[must_use = "Elapsed time is measured between creation and drop"]
pub struct ElapsedSpan {
    registry: Arc<Registry<Duration>>,
    name: String,
    start: Instant,
}

impl ElapsedSpan {
    pub(crate) fn new(registry: Arc<Registry<Duration>>, name: String) -> Self {
        let start = registry.platform().now();

        Self {
            registry,
            name,
            start,
        }
    }

    /// The name the elapsed time will be recorded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wall time elapsed since the span was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.registry
            .platform()
            .now()
            .saturating_duration_since(self.start)
    }
}

impl Drop for ElapsedSpan {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        self.registry.record(&self.name, elapsed);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::pal::FakePlatform;
    use crate::{Measurement, Session};

    assert_impl_all!(ElapsedSpan: Send, Sync);

    fn create_test_session() -> (Session, FakePlatform) {
        let fake_platform = FakePlatform::new();
        let session = Session::with_platform(
            crate::pal::PlatformFacade::fake(fake_platform.clone()),
        );

        (session, fake_platform)
    }

    #[test]
    fn records_elapsed_time_on_drop() {
        let (session, clock) = create_test_session();
        let timings = session.registry::<Duration>();

        {
            let span = timings.measure_elapsed("load");
            clock.advance(Duration::from_millis(250));

            assert_eq!(span.name(), "load");
            assert_eq!(span.elapsed(), Duration::from_millis(250));

            // Nothing is recorded until the span is dropped.
            assert!(timings.fetch("load").unwrap().is_empty());
        }

        let recorded: Vec<_> = timings
            .fetch("load")
            .unwrap()
            .into_iter()
            .map(Measurement::into_data)
            .collect();

        assert_eq!(recorded, vec![Duration::from_millis(250)]);
    }

    #[test]
    fn timestamp_is_taken_at_drop() {
        let (session, clock) = create_test_session();
        let timings = session.registry::<Duration>();

        let span = timings.measure_elapsed("save");
        clock.advance(Duration::from_secs(3));
        let dropped_at = clock.now();
        drop(span);

        let recorded = timings.fetch("save").unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded.first().map(Measurement::timestamp), Some(dropped_at));
    }

    #[test]
    fn respects_thread_split() {
        let (session, _) = create_test_session();
        let timings = session.registry::<Duration>();
        timings.mark_thread_split("work");

        {
            let _span = timings.measure_elapsed("work");
        }

        let this_thread = std::thread::current().id();
        assert_eq!(
            timings.fetch_for_thread("work", this_thread).unwrap().len(),
            1
        );
    }
}
