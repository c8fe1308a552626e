#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A fixed-capacity ring buffer that retains the most recently inserted values.
//!
//! [`BoundedHistory`] holds at most `capacity` elements. Once full, every insert overwrites the
//! oldest element, so the history always contains the last `capacity` values that were inserted.
//! Inserting is O(1) and never fails.
//!
//! Elements are addressed by *age*: age 0 is the most recently inserted element and increasing
//! ages walk toward the oldest one.
//!
//! ```
//! use bounded_history::BoundedHistory;
//!
//! let mut history = BoundedHistory::new(4);
//!
//! for value in 1..=6 {
//!     history.insert(value);
//! }
//!
//! // Only the last four values are retained, iterated youngest first.
//! assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![6, 5, 4, 3]);
//!
//! assert_eq!(history.youngest(), Some(&6));
//! assert_eq!(history.oldest(), Some(&3));
//! assert_eq!(history.at(3), Ok(&3));
//! assert!(history.at(4).is_err());
//! ```
//!
//! # Capacity zero
//!
//! A history with capacity zero is legal. It is always full and never retains anything, so
//! inserting into it is a no-op.
//!
//! # Panics
//!
//! Checked access via [`at()`][BoundedHistory::at] returns an error for out-of-range ages.
//! Indexing via `history[age]` panics instead. [`youngest()`][BoundedHistory::youngest] and
//! [`oldest()`][BoundedHistory::oldest] return `None` for an empty history.

mod error;
mod history;
mod iter;

pub use error::*;
pub use history::*;
pub use iter::*;
