//! Storage of the measurements of one recorded type.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::Duration;

use foldhash::{HashMap, HashMapExt};
use itertools::Itertools;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::{
    Capacity, ElapsedSpan, Error, Measurement, MeasurementContainer, MeasurementKey, ScopeMode,
    ThreadScope, TimeRange,
};

/// Holds every measurement of type `T`, keyed by name and thread scope.
///
/// Obtain a registry from a [`Session`][crate::Session], which keeps one registry per recorded
/// type. Registries of different types never share data, even if the same names are used.
///
/// # Thread scopes
///
/// By default all threads record into one container per name, read via [`fetch()`][Self::fetch].
/// After [`mark_thread_split()`][Self::mark_thread_split], each thread records into its own
/// container, read via [`fetch_for_thread()`][Self::fetch_for_thread] or
/// [`fetch_for_all_threads()`][Self::fetch_for_all_threads]. Using the wrong kind of read for a
/// name returns [`Error::InvalidMode`].
///
/// Splitting is meant to happen before recording starts. Measurements recorded before the split
/// stay in the unified container, which can no longer be read once the name is split. A `record()`
/// call racing with `mark_thread_split()` on another thread may land on either side of the split.
///
/// # Capacity
///
/// Each name has a [`Capacity`] that applies to all of its containers. Unless changed via
/// [`set_capacity()`][Self::set_capacity], the session default applies (unbounded unless
/// configured otherwise).
///
/// # Examples
///
/// ```
/// use measurements::{Capacity, Session};
///
/// let session = Session::new();
/// let queue_depths = session.registry::<usize>();
///
/// queue_depths.set_capacity("queue_depth", Capacity::Bounded(2));
///
/// queue_depths.record("queue_depth", 10);
/// queue_depths.record("queue_depth", 12);
/// queue_depths.record("queue_depth", 7);
///
/// let retained: Vec<_> = queue_depths
///     .fetch("queue_depth")
///     .unwrap()
///     .into_iter()
///     .map(|m| m.into_data())
///     .collect();
///
/// assert_eq!(retained, vec![12, 7]);
/// ```
///
/// # Thread safety
///
/// Every operation is synchronous and only blocks while another thread holds one of the two
/// internal locks. Reads return independent copies.
pub struct Registry<T> {
    store: Mutex<Store<T>>,

    // Independent of `store`; no operation holds both locks at once.
    thread_split: Mutex<HashMap<String, bool>>,

    default_capacity: Capacity,
    platform: PlatformFacade,
}

/// Measurements of one name grouped by the thread that recorded them.
///
/// The map uses the `foldhash` hasher. Annotate results with this alias rather than
/// `std::collections::HashMap`, whose default hasher is a different type.
pub type PerThreadMeasurements<T> = HashMap<ThreadId, Vec<Measurement<T>>>;

struct Store<T> {
    containers: HashMap<MeasurementKey, MeasurementContainer<T>>,

    // Names without an entry use the registry default.
    capacities: HashMap<String, Capacity>,
}

impl<T> Registry<T>
where
    T: Send + 'static,
{
    #[must_use]
    pub(crate) fn new(default_capacity: Capacity, platform: PlatformFacade) -> Self {
        Self {
            store: Mutex::new(Store {
                containers: HashMap::new(),
                capacities: HashMap::new(),
            }),
            thread_split: Mutex::new(HashMap::new()),
            default_capacity,
            platform,
        }
    }

    /// Records `value` under `name`, timestamped with the current time.
    ///
    /// If the name is split by thread, the value is stored for the calling thread. Containers are
    /// created on first use with the capacity configured for the name.
    pub fn record(&self, name: &str, value: T) {
        let timestamp = self.platform.now();
        let scope = self.resolve_scope(name);

        let mut store = self.store.lock();
        let capacity = store.capacity_of(name, self.default_capacity);

        store
            .containers
            .entry(MeasurementKey::new(name, scope))
            .or_insert_with(|| {
                trace!(
                    recorded_type = type_name::<T>(),
                    name,
                    ?scope,
                    %capacity,
                    "creating measurement container"
                );

                MeasurementContainer::new(capacity)
            })
            .push(Measurement::new(timestamp, value));
    }

    /// Returns a copy of every measurement recorded under `name`, oldest first.
    ///
    /// A name that was never recorded yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is split by thread.
    pub fn fetch(&self, name: &str) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone,
    {
        self.fetch_within(name, TimeRange::all())
    }

    /// Returns a copy of the measurements recorded under `name` within `range`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is split by thread.
    pub fn fetch_within(&self, name: &str, range: TimeRange) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone,
    {
        self.require_mode(name, ScopeMode::Unified)?;

        let key = MeasurementKey::new(name, ThreadScope::AllThreads);

        let store = self.store.lock();
        Ok(store
            .containers
            .get(&key)
            .map_or_else(Vec::new, |container| container.snapshot(&range)))
    }

    /// Returns a copy of the measurements recorded under `name` by one thread, oldest first.
    ///
    /// A thread that never recorded under `name` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is not split by thread.
    pub fn fetch_for_thread(
        &self,
        name: &str,
        thread_id: ThreadId,
    ) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone,
    {
        self.fetch_for_thread_within(name, thread_id, TimeRange::all())
    }

    /// Returns a copy of the measurements recorded under `name` by one thread within `range`,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is not split by thread.
    pub fn fetch_for_thread_within(
        &self,
        name: &str,
        thread_id: ThreadId,
        range: TimeRange,
    ) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone,
    {
        self.require_mode(name, ScopeMode::PerThread)?;

        let key = MeasurementKey::new(name, ThreadScope::Thread(thread_id));

        let store = self.store.lock();
        Ok(store
            .containers
            .get(&key)
            .map_or_else(Vec::new, |container| container.snapshot(&range)))
    }

    /// Returns a copy of the measurements recorded under `name`, grouped by recording thread.
    ///
    /// Every thread that ever recorded under `name` has an entry, including threads that have
    /// since terminated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is not split by thread.
    pub fn fetch_for_all_threads(
        &self,
        name: &str,
    ) -> crate::Result<PerThreadMeasurements<T>>
    where
        T: Clone,
    {
        self.fetch_for_all_threads_within(name, TimeRange::all())
    }

    /// Returns a copy of the measurements recorded under `name` within `range`, grouped by
    /// recording thread.
    ///
    /// Threads whose measurements all fall outside `range` still have an (empty) entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`] if `name` is not split by thread.
    pub fn fetch_for_all_threads_within(
        &self,
        name: &str,
        range: TimeRange,
    ) -> crate::Result<PerThreadMeasurements<T>>
    where
        T: Clone,
    {
        self.require_mode(name, ScopeMode::PerThread)?;

        let store = self.store.lock();
        Ok(store
            .containers
            .iter()
            .filter(|(key, _)| key.name() == name)
            .filter_map(|(key, container)| {
                key.scope()
                    .thread_id()
                    .map(|thread_id| (thread_id, container.snapshot(&range)))
            })
            .collect())
    }

    /// Removes every measurement of this type, under every name and thread scope.
    ///
    /// Capacity and thread split settings are not affected.
    pub fn clear_all(&self) {
        let mut store = self.store.lock();

        debug!(
            recorded_type = type_name::<T>(),
            containers = store.containers.len(),
            "clearing all measurements"
        );

        store.containers.clear();
    }

    /// Removes every measurement recorded under `name`, in every thread scope.
    ///
    /// Capacity and thread split settings are not affected.
    pub fn clear_by_name(&self, name: &str) {
        let mut store = self.store.lock();
        store.containers.retain(|key, _| key.name() != name);

        debug!(recorded_type = type_name::<T>(), name, "cleared measurements");
    }

    /// Sets how many measurements are retained for `name`.
    ///
    /// Existing containers for the name are converted right away, keeping their latest
    /// measurements up to the new capacity. Containers created later for the name (for example,
    /// by threads that have not recorded yet) use the new capacity as well.
    pub fn set_capacity(&self, name: &str, capacity: Capacity) {
        let mut store = self.store.lock();
        store.capacities.insert(name.to_owned(), capacity);

        let converted = store
            .containers
            .iter_mut()
            .filter(|(key, _)| key.name() == name)
            .map(|(_, container)| container.convert(capacity))
            .count();

        debug!(
            recorded_type = type_name::<T>(),
            name,
            %capacity,
            converted,
            "measurement capacity changed"
        );
    }

    /// The capacity that applies to `name`.
    #[must_use]
    pub fn capacity(&self, name: &str) -> Capacity {
        self.store.lock().capacity_of(name, self.default_capacity)
    }

    /// Splits the measurements of `name` by recording thread from now on.
    ///
    /// This cannot be undone. Measurements recorded under `name` before this call remain in the
    /// unified container and are no longer readable via [`fetch()`][Self::fetch].
    pub fn mark_thread_split(&self, name: &str) {
        let previous = self.thread_split.lock().insert(name.to_owned(), true);

        if previous != Some(true) {
            debug!(
                recorded_type = type_name::<T>(),
                name, "measurements are now split by thread"
            );
        }
    }

    /// Whether the measurements of `name` are split by recording thread.
    #[must_use]
    pub fn is_thread_split(&self, name: &str) -> bool {
        self.thread_split
            .lock()
            .get(name)
            .copied()
            .unwrap_or_default()
    }

    /// The thread scope mode of `name`.
    #[must_use]
    pub fn scope_mode(&self, name: &str) -> ScopeMode {
        if self.is_thread_split(name) {
            ScopeMode::PerThread
        } else {
            ScopeMode::Unified
        }
    }

    /// The distinct names that currently hold measurements, in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let store = self.store.lock();

        store
            .containers
            .keys()
            .map(MeasurementKey::name)
            .sorted_unstable()
            .dedup()
            .map(str::to_owned)
            .collect()
    }

    pub(crate) fn platform(&self) -> &PlatformFacade {
        &self.platform
    }

    fn resolve_scope(&self, name: &str) -> ThreadScope {
        match self.scope_mode(name) {
            ScopeMode::Unified => ThreadScope::AllThreads,
            ScopeMode::PerThread => ThreadScope::current_thread(),
        }
    }

    fn require_mode(&self, name: &str, required: ScopeMode) -> crate::Result<()> {
        let mode = self.scope_mode(name);

        if mode == required {
            Ok(())
        } else {
            Err(Error::InvalidMode {
                name: name.to_owned(),
                mode,
            })
        }
    }
}

impl Registry<Duration> {
    /// Creates a span that records the wall time elapsed between its creation and drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use measurements::{FunctionTiming, Session};
    ///
    /// let session = Session::new();
    /// let timings = session.registry::<FunctionTiming>();
    ///
    /// {
    ///     let _span = timings.measure_elapsed("load_config");
    ///     // Work happens here.
    /// }
    ///
    /// assert_eq!(timings.fetch("load_config").unwrap().len(), 1);
    /// ```
    pub fn measure_elapsed(self: &Arc<Self>, name: impl Into<String>) -> ElapsedSpan {
        ElapsedSpan::new(Arc::clone(self), name.into())
    }
}

impl<T> Store<T> {
    fn capacity_of(&self, name: &str, default: Capacity) -> Capacity {
        self.capacities.get(name).copied().unwrap_or(default)
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let container_count = self.store.lock().containers.len();

        f.debug_struct(type_name::<Self>())
            .field("container_count", &container_count)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}
