use std::ops::{Index, IndexMut};

use crate::{Error, Iter, IterMut};

// Upper bound on the storage reserved up front. Larger histories grow as elements arrive.
const INITIAL_RESERVATION: usize = 1024;

/// A ring buffer with a fixed capacity that keeps the most recently inserted elements.
///
/// When the history is full, inserting overwrites the oldest element. Elements are moved in
/// and never cloned by the history itself.
///
/// Elements are addressed by age: age 0 is the youngest (most recently inserted) element and
/// age `len() - 1` is the oldest one still retained.
///
/// # Examples
///
/// ```
/// use bounded_history::BoundedHistory;
///
/// let mut history = BoundedHistory::new(2);
/// history.insert("a");
/// history.insert("b");
/// history.insert("c");
///
/// assert!(history.is_full());
/// assert_eq!(history[0], "c");
/// assert_eq!(history[1], "b");
/// ```
#[derive(Clone, Debug)]
pub struct BoundedHistory<T> {
    // Grows up to `capacity` elements and never beyond. Until the history is full, the elements
    // are stored oldest first and `head == storage.len()`.
    storage: Vec<T>,
    capacity: usize,

    // Index of the slot the next insert will write to.
    head: usize,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history that will retain up to `capacity` elements.
    ///
    /// A capacity of zero is permitted. Such a history is always full and retains nothing.
    ///
    /// Storage is allocated as elements arrive, so any capacity up to `usize::MAX` is accepted.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity.min(INITIAL_RESERVATION)),
            capacity,
            head: 0,
        }
    }

    /// Inserts an element, evicting the oldest element if the history is full.
    pub fn insert(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }

        if self.is_full() {
            let slot = self
                .storage
                .get_mut(self.head)
                .expect("head is always a valid slot once the history is full");
            *slot = value;
        } else {
            self.storage.push(value);
        }

        self.head = inc_wrap(self.head, self.capacity);
    }

    /// Removes all elements. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = 0;
    }

    /// The number of elements currently in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the history holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// The maximum number of elements the history retains.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the history holds `capacity()` elements, meaning that the next insert will
    /// evict the oldest element.
    ///
    /// A history with capacity zero is always full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Returns the element of the given age, where age 0 is the youngest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `age >= len()`.
    pub fn at(&self, age: usize) -> crate::Result<&T> {
        let len = self.len();

        if age >= len {
            return Err(Error::OutOfRange { age, len });
        }

        self.storage
            .get(self.index_from_age(self.youngest_index(), age))
            .ok_or(Error::OutOfRange { age, len })
    }

    /// Returns an exclusive reference to the element of the given age, where age 0 is the
    /// youngest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `age >= len()`.
    pub fn at_mut(&mut self, age: usize) -> crate::Result<&mut T> {
        let len = self.len();

        if age >= len {
            return Err(Error::OutOfRange { age, len });
        }

        let index = self.index_from_age(self.youngest_index(), age);

        self.storage
            .get_mut(index)
            .ok_or(Error::OutOfRange { age, len })
    }

    /// The most recently inserted element, or `None` if the history is empty.
    #[must_use]
    pub fn youngest(&self) -> Option<&T> {
        self.at(0).ok()
    }

    /// Exclusive reference to the most recently inserted element, or `None` if the history is
    /// empty.
    #[must_use]
    pub fn youngest_mut(&mut self) -> Option<&mut T> {
        self.at_mut(0).ok()
    }

    /// The oldest element still retained, or `None` if the history is empty.
    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        let age = self.len().checked_sub(1)?;
        self.at(age).ok()
    }

    /// Exclusive reference to the oldest element still retained, or `None` if the history is
    /// empty.
    #[must_use]
    pub fn oldest_mut(&mut self) -> Option<&mut T> {
        let age = self.len().checked_sub(1)?;
        self.at_mut(age).ok()
    }

    /// Iterates over the elements from youngest to oldest.
    ///
    /// The iterator is double-ended, so `iter().rev()` iterates from oldest to youngest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.youngest_index())
    }

    /// Iterates over exclusive references to the elements from youngest to oldest.
    ///
    /// Changes made through the iterator are visible to later indexed access.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // Below `head` are the younger elements (newest at head - 1), from `head` onward are the
        // older ones (newest at the end). Before the history is full, the second part is empty.
        let split = self.head.min(self.storage.len());
        let (newer, older) = self.storage.split_at_mut(split);

        IterMut::new(newer, older)
    }

    /// Consumes the history, returning its elements ordered from oldest to youngest.
    #[must_use]
    pub fn into_vec_oldest_first(mut self) -> Vec<T> {
        if self.is_full() {
            // The oldest element sits at `head` once the history has wrapped around.
            self.storage.rotate_left(self.head);
        }

        self.storage
    }

    /// Returns a copy of the elements ordered from oldest to youngest.
    #[must_use]
    pub fn to_vec_oldest_first(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().rev().cloned().collect()
    }

    /// Consumes the history, returning a new one with a different capacity that holds the
    /// youngest `min(len(), capacity)` elements in their original order.
    #[must_use]
    pub fn into_resized(self, capacity: usize) -> Self {
        let mut resized = Self::new(capacity);
        let elements = self.into_vec_oldest_first();

        let skip = elements.len().saturating_sub(capacity);
        resized.extend(elements.into_iter().skip(skip));

        resized
    }

    /// Storage slot of the element `age` steps older than the element in slot `offset`.
    ///
    /// Only meaningful for `age < len()`.
    pub(crate) fn slot(&self, offset: usize, age: usize) -> Option<&T> {
        if age >= self.len() {
            return None;
        }

        self.storage.get(self.index_from_age(offset, age))
    }

    fn youngest_index(&self) -> usize {
        if self.capacity == 0 {
            return 0;
        }

        // We wrap by capacity: a partially filled history never has head == 0 unless it is
        // empty, in which case the index is never dereferenced.
        dec_wrap(self.head, self.capacity)
    }

    #[expect(
        clippy::arithmetic_side_effects,
        reason = "each subtraction is guarded by the comparison, and age < len <= capacity"
    )]
    fn index_from_age(&self, youngest_index: usize, age: usize) -> usize {
        debug_assert!(age < self.len());

        // Same as (capacity + youngest_index - age) % capacity without the intermediate sum,
        // which overflows for capacities near usize::MAX.
        if age <= youngest_index {
            youngest_index - age
        } else {
            self.capacity - (age - youngest_index)
        }
    }
}

impl<T> Index<usize> for BoundedHistory<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `age >= len()`.
    fn index(&self, age: usize) -> &Self::Output {
        match self.at(age) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for BoundedHistory<T> {
    /// # Panics
    ///
    /// Panics if `age >= len()`.
    fn index_mut(&mut self, age: usize) -> &mut Self::Output {
        match self.at_mut(age) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> Extend<T> for BoundedHistory<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a BoundedHistory<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BoundedHistory<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Increments `index`, wrapping to zero when it reaches `threshold`.
fn inc_wrap(index: usize, threshold: usize) -> usize {
    let next = index.wrapping_add(1);

    if next >= threshold { 0 } else { next }
}

/// Decrements `index`, wrapping to `threshold - 1` when it would go below zero.
fn dec_wrap(index: usize, threshold: usize) -> usize {
    match index.checked_sub(1) {
        Some(previous) => previous,
        None => threshold.wrapping_sub(1),
    }
}
