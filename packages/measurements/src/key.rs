use std::fmt;
use std::thread::{self, ThreadId};

/// Which threads a set of measurements belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "measurements belong to one thread or to all of them"
)]
pub enum ThreadScope {
    /// Measurements from every thread, stored together. Used for names that are not split
    /// by thread.
    AllThreads,

    /// Measurements recorded by one specific thread.
    Thread(ThreadId),
}

impl ThreadScope {
    /// The scope of the calling thread.
    #[must_use]
    pub fn current_thread() -> Self {
        Self::Thread(thread::current().id())
    }

    /// The thread this scope is limited to, if any.
    #[must_use]
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self {
            Self::AllThreads => None,
            Self::Thread(id) => Some(*id),
        }
    }
}

/// Whether the measurements of a name are kept together or split by recording thread.
///
/// Every name starts out [`Unified`][Self::Unified]. Marking a name as split by thread moves it to
/// [`PerThread`][Self::PerThread], from which there is no way back.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "mirrors the two ThreadScope variants"
)]
pub enum ScopeMode {
    /// All threads record into the same [`ThreadScope::AllThreads`] container.
    Unified,

    /// Each thread records into its own [`ThreadScope::Thread`] container.
    PerThread,
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unified => write!(f, "unified across threads"),
            Self::PerThread => write!(f, "per thread"),
        }
    }
}

/// Identifies one measurement container: a name together with a thread scope.
///
/// Equality and hashing consider both the name and the scope.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MeasurementKey {
    name: String,
    scope: ThreadScope,
}

impl MeasurementKey {
    /// Creates a key for the measurements of `name` recorded in `scope`.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: ThreadScope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    /// The measurement name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The thread scope.
    #[must_use]
    pub fn scope(&self) -> ThreadScope {
        self.scope
    }
}
