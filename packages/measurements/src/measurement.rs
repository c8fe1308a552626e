use std::ops::RangeInclusive;
use std::time::Instant;

/// A value recorded at a specific point in time.
///
/// The timestamp is read from the monotonic clock inside the call that records the value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Measurement<T> {
    timestamp: Instant,
    data: T,
}

impl<T> Measurement<T> {
    /// Creates a measurement of `data` taken at `timestamp`.
    #[must_use]
    pub fn new(timestamp: Instant, data: T) -> Self {
        Self { timestamp, data }
    }

    /// When the measurement was recorded.
    #[must_use]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// The recorded value.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the measurement, returning the recorded value.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Selects the measurements taken within a span of time.
///
/// Both ends are inclusive. A missing end leaves that side of the range open.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use measurements::TimeRange;
///
/// let now = Instant::now();
/// let last_ten_seconds = TimeRange::since(now - Duration::from_secs(10));
///
/// assert!(last_ten_seconds.contains(now));
/// assert!(TimeRange::all().contains(now));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimeRange {
    begin: Option<Instant>,
    end: Option<Instant>,
}

impl TimeRange {
    /// A range that includes every measurement.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            begin: None,
            end: None,
        }
    }

    /// Measurements taken at or after `begin`.
    #[must_use]
    pub const fn since(begin: Instant) -> Self {
        Self {
            begin: Some(begin),
            end: None,
        }
    }

    /// Measurements taken at or before `end`.
    #[must_use]
    pub const fn until(end: Instant) -> Self {
        Self {
            begin: None,
            end: Some(end),
        }
    }

    /// Measurements taken at or after `begin` and at or before `end`.
    ///
    /// If `end` is earlier than `begin`, the range is empty.
    #[must_use]
    pub const fn between(begin: Instant, end: Instant) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
        }
    }

    /// Whether `timestamp` falls within the range.
    #[must_use]
    pub fn contains(&self, timestamp: Instant) -> bool {
        self.begin.is_none_or(|begin| timestamp >= begin)
            && self.end.is_none_or(|end| timestamp <= end)
    }
}

impl From<RangeInclusive<Instant>> for TimeRange {
    fn from(range: RangeInclusive<Instant>) -> Self {
        let (begin, end) = range.into_inner();
        Self::between(begin, end)
    }
}
