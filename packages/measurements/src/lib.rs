#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! In-process storage for measurements recorded by instrumented code.
//!
//! Instrumented code records values under string names. Each value is timestamped when it is
//! recorded and kept until it is cleared or evicted by a capacity limit. Analysis code reads back
//! copies of what was recorded, optionally narrowed to a time range.
//!
//! The core types are:
//! - [`Session`] - The context instrumented code records into, holding one registry per type
//! - [`Registry`] - All measurements of one type, keyed by name and thread scope
//! - [`Measurement`] - A recorded value with its timestamp
//! - [`Capacity`] - How many measurements are retained per name
//! - [`ElapsedSpan`] - Records the wall time of a scope when dropped
//!
//! # Recording and reading
//!
//! ```
//! use measurements::{Capacity, Session};
//!
//! let session = Session::new();
//!
//! session.set_capacity::<f64>("temperature", Capacity::Bounded(3));
//!
//! for reading in [20.5, 20.7, 21.0, 21.4] {
//!     session.record("temperature", reading);
//! }
//!
//! let latest: Vec<f64> = session
//!     .fetch::<f64>("temperature")
//!     .unwrap()
//!     .into_iter()
//!     .map(|m| m.into_data())
//!     .collect();
//!
//! assert_eq!(latest, vec![20.7, 21.0, 21.4]);
//! ```
//!
//! # Measurement types
//!
//! Any `Send + 'static` type can be recorded. Every type has its own independent namespace, so
//! marker types such as [`FunctionCall`] and [`PeriodicEvent`] can reuse the names of the
//! functions or loops they describe without colliding with other data.
//!
//! # Per-thread measurements
//!
//! A name can be split by thread, after which every thread records into its own container:
//!
//! ```
//! use std::thread;
//!
//! use measurements::{FunctionCall, Session};
//!
//! let session = Session::new();
//! session.mark_thread_split::<FunctionCall>("worker_step");
//!
//! let worker_session = session.clone();
//! let worker = thread::spawn(move || {
//!     worker_session.record("worker_step", FunctionCall);
//!     worker_session.record("worker_step", FunctionCall);
//! });
//! let worker_id = worker.thread().id();
//! worker.join().unwrap();
//!
//! session.record("worker_step", FunctionCall);
//!
//! let by_thread = session.fetch_for_all_threads::<FunctionCall>("worker_step").unwrap();
//! assert_eq!(by_thread[&worker_id].len(), 2);
//! assert_eq!(by_thread[&thread::current().id()].len(), 1);
//!
//! // Unified reads are rejected for split names.
//! assert!(session.fetch::<FunctionCall>("worker_step").is_err());
//! ```
//!
//! # Timing scopes
//!
//! ```
//! use measurements::{FunctionTiming, Session};
//!
//! let session = Session::new();
//!
//! {
//!     let _span = session.measure_elapsed("load_config");
//!     // Work being timed.
//! }
//!
//! assert_eq!(session.fetch::<FunctionTiming>("load_config").unwrap().len(), 1);
//! ```
//!
//! # Logging
//!
//! The package emits `tracing` events at `debug` level for configuration changes and at `trace`
//! level for container creation. Install a subscriber to see them.

mod container;
mod elapsed_span;
mod error;
mod key;
mod measurement;
mod pal;
mod registry;
mod session;
mod value_types;

pub use container::*;
pub use elapsed_span::*;
pub use error::*;
pub use key::*;
pub use measurement::*;
pub use registry::*;
pub use session::*;
pub use value_types::*;
