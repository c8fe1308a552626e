use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use std::thread::ThreadId;

use foldhash::{HashMap, HashMapExt};
use parking_lot::Mutex;
use tracing::debug;

use crate::pal::PlatformFacade;
use crate::{
    Capacity, ElapsedSpan, FunctionTiming, Measurement, PerThreadMeasurements, Registry,
};

type AnyRegistry = Arc<dyn Any + Send + Sync>;

/// Holds the measurement registries of an application, one per recorded type.
///
/// A session is the context that instrumented code records into. Pass it (or a clone of it) to
/// every component that records or reads measurements. Clones share the same registries.
///
/// The registry for a type is created the first time that type is used with the session.
/// The convenience methods on `Session` forward to [`registry::<T>()`][Self::registry]; hold on
/// to the returned [`Registry`] to avoid the type lookup on hot paths.
///
/// Multiple independent sessions can be used concurrently, for example one per test.
///
/// # Examples
///
/// ```
/// use measurements::{FunctionCall, PeriodicEvent, Session};
///
/// let session = Session::new();
///
/// session.record("frame", PeriodicEvent);
/// session.record("frame", PeriodicEvent);
/// session.record("frame", FunctionCall);
///
/// // Each recorded type has its own registry, even when names overlap.
/// assert_eq!(session.fetch::<PeriodicEvent>("frame").unwrap().len(), 2);
/// assert_eq!(session.fetch::<FunctionCall>("frame").unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    registries: Mutex<HashMap<TypeId, AnyRegistry>>,
    default_capacity: Capacity,
    platform: PlatformFacade,
}

impl Session {
    /// Creates a session where every name retains all of its measurements.
    ///
    /// Use [`Session::builder()`] for custom configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring the session.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Creates a session with a specific platform.
    ///
    /// Used by tests to control the timestamps attached to measurements.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self::from_parts(Capacity::Unbounded, platform)
    }

    fn from_parts(default_capacity: Capacity, platform: PlatformFacade) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                registries: Mutex::new(HashMap::new()),
                default_capacity,
                platform,
            }),
        }
    }

    /// The capacity that applies to names without an explicit capacity.
    #[must_use]
    pub fn default_capacity(&self) -> Capacity {
        self.inner.default_capacity
    }

    /// Returns the registry that holds measurements of type `T`, creating it if needed.
    #[must_use]
    pub fn registry<T>(&self) -> Arc<Registry<T>>
    where
        T: Send + 'static,
    {
        let registry = {
            let mut registries = self.inner.registries.lock();

            Arc::clone(registries.entry(TypeId::of::<T>()).or_insert_with(|| {
                debug!(
                    recorded_type = type_name::<T>(),
                    default_capacity = %self.inner.default_capacity,
                    "creating measurement registry"
                );

                let registry: AnyRegistry = Arc::new(Registry::<T>::new(
                    self.inner.default_capacity,
                    self.inner.platform.clone(),
                ));
                registry
            }))
        };

        registry.downcast::<Registry<T>>().unwrap_or_else(|_| {
            panic!(
                "registry keyed by the type id of {} has a different type",
                type_name::<T>()
            )
        })
    }

    /// Records `value` under `name`. See [`Registry::record()`].
    pub fn record<T>(&self, name: &str, value: T)
    where
        T: Send + 'static,
    {
        self.registry::<T>().record(name, value);
    }

    /// Returns the measurements of type `T` recorded under `name`. See [`Registry::fetch()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`][crate::Error::InvalidMode] if `name` is split by thread.
    pub fn fetch<T>(&self, name: &str) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone + Send + 'static,
    {
        self.registry::<T>().fetch(name)
    }

    /// Returns the measurements of type `T` recorded under `name` by one thread.
    /// See [`Registry::fetch_for_thread()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`][crate::Error::InvalidMode] if `name` is not split by thread.
    pub fn fetch_for_thread<T>(
        &self,
        name: &str,
        thread_id: ThreadId,
    ) -> crate::Result<Vec<Measurement<T>>>
    where
        T: Clone + Send + 'static,
    {
        self.registry::<T>().fetch_for_thread(name, thread_id)
    }

    /// Returns the measurements of type `T` recorded under `name`, grouped by thread.
    /// See [`Registry::fetch_for_all_threads()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMode`][crate::Error::InvalidMode] if `name` is not split by thread.
    pub fn fetch_for_all_threads<T>(
        &self,
        name: &str,
    ) -> crate::Result<PerThreadMeasurements<T>>
    where
        T: Clone + Send + 'static,
    {
        self.registry::<T>().fetch_for_all_threads(name)
    }

    /// Sets how many measurements of type `T` are retained for `name`.
    /// See [`Registry::set_capacity()`].
    pub fn set_capacity<T>(&self, name: &str, capacity: Capacity)
    where
        T: Send + 'static,
    {
        self.registry::<T>().set_capacity(name, capacity);
    }

    /// Splits the measurements of type `T` under `name` by recording thread.
    /// See [`Registry::mark_thread_split()`].
    pub fn mark_thread_split<T>(&self, name: &str)
    where
        T: Send + 'static,
    {
        self.registry::<T>().mark_thread_split(name);
    }

    /// Whether the measurements of type `T` under `name` are split by recording thread.
    #[must_use]
    pub fn is_thread_split<T>(&self, name: &str) -> bool
    where
        T: Send + 'static,
    {
        self.registry::<T>().is_thread_split(name)
    }

    /// Removes every measurement of type `T`. See [`Registry::clear_all()`].
    pub fn clear_all<T>(&self)
    where
        T: Send + 'static,
    {
        self.registry::<T>().clear_all();
    }

    /// Removes every measurement of type `T` recorded under `name`.
    /// See [`Registry::clear_by_name()`].
    pub fn clear_by_name<T>(&self, name: &str)
    where
        T: Send + 'static,
    {
        self.registry::<T>().clear_by_name(name);
    }

    /// Creates a span that records the wall time elapsed until it is dropped as a
    /// [`FunctionTiming`] under `name`.
    pub fn measure_elapsed(&self, name: impl Into<String>) -> ElapsedSpan {
        self.registry::<FunctionTiming>().measure_elapsed(name)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry_count = self.inner.registries.lock().len();

        f.debug_struct(type_name::<Self>())
            .field("registry_count", &registry_count)
            .field("default_capacity", &self.inner.default_capacity)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`Session`].
#[derive(Debug)]
pub struct SessionBuilder {
    default_capacity: Capacity,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            default_capacity: Capacity::Unbounded,
        }
    }

    /// Sets the capacity used for every name that has no capacity of its own.
    ///
    /// Default is [`Capacity::Unbounded`].
    #[must_use]
    pub fn default_capacity(mut self, capacity: Capacity) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Builds the session with the configured settings.
    #[must_use]
    pub fn build(self) -> Session {
        Session::from_parts(self.default_capacity, PlatformFacade::real())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::Duration;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{FunctionCall, PeriodicEvent};

    assert_impl_all!(Session: Send, Sync, Clone);

    fn data<T>(measurements: Vec<Measurement<T>>) -> Vec<T> {
        measurements.into_iter().map(Measurement::into_data).collect()
    }

    #[test]
    fn same_type_returns_same_registry() {
        let session = Session::new();

        let first = session.registry::<u64>();
        let second = session.registry::<u64>();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clones_share_registries() {
        let session = Session::new();
        let clone = session.clone();

        clone.record("shared", 5_u64);

        assert_eq!(data(session.fetch::<u64>("shared").unwrap()), vec![5]);
    }

    #[test]
    fn separate_sessions_are_independent() {
        let first = Session::new();
        let second = Session::new();

        first.record("name", 1_u64);

        assert!(second.fetch::<u64>("name").unwrap().is_empty());
    }

    #[test]
    fn types_do_not_cross_contaminate() {
        let session = Session::new();

        session.record("value", 42_i32);
        session.record("value", "forty-two".to_string());
        session.record("value", 43_i32);

        assert_eq!(data(session.fetch::<i32>("value").unwrap()), vec![42, 43]);
        assert_eq!(
            data(session.fetch::<String>("value").unwrap()),
            vec!["forty-two".to_string()]
        );
    }

    #[test]
    fn settings_are_per_type() {
        let session = Session::new();

        session.mark_thread_split::<FunctionCall>("handler");
        session.set_capacity::<PeriodicEvent>("handler", Capacity::Bounded(1));

        assert!(session.is_thread_split::<FunctionCall>("handler"));
        assert!(!session.is_thread_split::<PeriodicEvent>("handler"));

        session.record("handler", PeriodicEvent);
        session.record("handler", PeriodicEvent);

        assert_eq!(session.fetch::<PeriodicEvent>("handler").unwrap().len(), 1);
        assert!(session.fetch::<FunctionCall>("handler").is_err());
    }

    #[test]
    fn clearing_one_type_keeps_others() {
        let session = Session::new();

        session.record("x", 1_u8);
        session.record("x", 1_u16);
        session.record("y", 1_u16);

        session.clear_all::<u8>();
        session.clear_by_name::<u16>("x");

        assert!(session.fetch::<u8>("x").unwrap().is_empty());
        assert!(session.fetch::<u16>("x").unwrap().is_empty());
        assert_eq!(session.fetch::<u16>("y").unwrap().len(), 1);
    }

    #[test]
    fn builder_sets_default_capacity() {
        let session = Session::builder()
            .default_capacity(Capacity::Bounded(2))
            .build();

        assert_eq!(session.default_capacity(), Capacity::Bounded(2));

        for value in 1..=4_u32 {
            session.record("recent", value);
        }

        assert_eq!(data(session.fetch::<u32>("recent").unwrap()), vec![3, 4]);

        // A per-name capacity overrides the default.
        session.set_capacity::<u32>("all", Capacity::Unbounded);
        for value in 1..=4_u32 {
            session.record("all", value);
        }

        assert_eq!(data(session.fetch::<u32>("all").unwrap()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn measure_elapsed_records_function_timing() {
        let session = Session::new();

        {
            let _span = session.measure_elapsed("scoped");
        }

        let timings = session.fetch::<FunctionTiming>("scoped").unwrap();
        assert_eq!(timings.len(), 1);
        assert!(timings.iter().all(|m| *m.data() < Duration::from_secs(60)));
    }

    #[test]
    fn debug_output_counts_registries() {
        let session = Session::new();
        session.record("a", 1_u8);
        session.record("a", 1_u16);

        let output = format!("{session:?}");
        assert!(output.contains("registry_count: 2"));
    }
}
