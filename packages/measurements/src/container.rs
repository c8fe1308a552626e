use std::fmt;
use std::mem;

use bounded_history::BoundedHistory;

use crate::{Measurement, TimeRange};

/// How many measurements are retained for a name.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "a name is either bounded or not, there is no third option"
)]
pub enum Capacity {
    /// Every measurement is retained.
    #[default]
    Unbounded,

    /// Only the latest `n` measurements are retained; older ones are evicted as new ones arrive.
    Bounded(usize),
}

impl Capacity {
    /// The capacity that retains every measurement.
    pub const UNBOUNDED: Self = Self::Unbounded;
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Bounded(n) => write!(f, "{n}"),
        }
    }
}

/// Storage for the measurements of one [`MeasurementKey`][crate::MeasurementKey].
///
/// Exactly one variant is active at a time. The registry picks the variant from the capacity
/// configured for the name and switches between them via [`convert()`][Self::convert].
#[derive(Clone, Debug)]
#[expect(
    clippy::exhaustive_enums,
    reason = "one variant per Capacity variant"
)]
pub enum MeasurementContainer<T> {
    /// Retains every measurement, oldest first.
    Unbounded(Vec<Measurement<T>>),

    /// Retains the latest measurements up to a fixed capacity.
    Bounded(BoundedHistory<Measurement<T>>),
}

impl<T> MeasurementContainer<T> {
    /// Creates an empty container of the variant that matches `capacity`.
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        match capacity {
            Capacity::Unbounded => Self::Unbounded(Vec::new()),
            Capacity::Bounded(n) => Self::Bounded(BoundedHistory::new(n)),
        }
    }

    /// Appends a measurement, evicting the oldest one if the container is bounded and full.
    pub fn push(&mut self, measurement: Measurement<T>) {
        match self {
            Self::Unbounded(log) => log.push(measurement),
            Self::Bounded(history) => history.insert(measurement),
        }
    }

    /// The number of measurements held.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unbounded(log) => log.len(),
            Self::Bounded(history) => history.len(),
        }
    }

    /// Whether the container holds no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The capacity the container currently enforces.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        match self {
            Self::Unbounded(_) => Capacity::Unbounded,
            Self::Bounded(history) => Capacity::Bounded(history.capacity()),
        }
    }

    /// Switches the container to the variant matching `capacity`.
    ///
    /// Measurements already recorded are kept up to the new capacity. When shrinking, the oldest
    /// measurements are dropped. When growing, nothing is added.
    pub fn convert(&mut self, capacity: Capacity) {
        if self.capacity() == capacity {
            return;
        }

        // The placeholder does not allocate and is overwritten right away.
        let current = mem::replace(self, Self::Unbounded(Vec::new()));

        *self = match (current, capacity) {
            (Self::Unbounded(log), Capacity::Unbounded) => Self::Unbounded(log),
            (Self::Unbounded(log), Capacity::Bounded(n)) => {
                let mut history = BoundedHistory::new(n);
                let skip = log.len().saturating_sub(n);
                history.extend(log.into_iter().skip(skip));
                Self::Bounded(history)
            }
            (Self::Bounded(history), Capacity::Unbounded) => {
                Self::Unbounded(history.into_vec_oldest_first())
            }
            (Self::Bounded(history), Capacity::Bounded(n)) => {
                Self::Bounded(history.into_resized(n))
            }
        };
    }

    /// Copies the measurements within `range`, oldest first.
    #[must_use]
    pub fn snapshot(&self, range: &TimeRange) -> Vec<Measurement<T>>
    where
        T: Clone,
    {
        let in_range = |measurement: &&Measurement<T>| range.contains(measurement.timestamp());

        match self {
            Self::Unbounded(log) => log.iter().filter(in_range).cloned().collect(),
            Self::Bounded(history) => history.iter().rev().filter(in_range).cloned().collect(),
        }
    }
}
