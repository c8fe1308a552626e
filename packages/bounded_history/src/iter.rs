use std::iter::{Chain, FusedIterator, Rev};
use std::{fmt, ptr, slice};

use crate::BoundedHistory;

/// Iterates over the elements of a [`BoundedHistory`] from youngest to oldest.
///
/// Created by [`BoundedHistory::iter()`]. Iterating from the back yields the oldest element first.
///
/// Two iterators are equal only if they walk the same history instance, started from the same
/// storage slot and have taken the same number of steps from each end. Iterators over different
/// histories are never equal, even when they point at elements of the same age.
pub struct Iter<'a, T> {
    history: &'a BoundedHistory<T>,

    // Storage slot of the youngest element at the time the iterator was created.
    offset: usize,

    // Ages still to be yielded are `front..back`.
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(history: &'a BoundedHistory<T>, offset: usize) -> Self {
        Self {
            history,
            offset,
            front: 0,
            back: history.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            history: self.history,
            offset: self.offset,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("offset", &self.offset)
            .field("front", &self.front)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.history, other.history)
            && self.offset == other.offset
            && self.front == other.front
            && self.back == other.back
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        let value = self.history.slot(self.offset, self.front);
        self.front = self.front.wrapping_add(1);
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        self.back = self.back.wrapping_sub(1);
        self.history.slot(self.offset, self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

type SlotsMut<'a, T> = Chain<Rev<slice::IterMut<'a, T>>, Rev<slice::IterMut<'a, T>>>;

/// Iterates over exclusive references to the elements of a [`BoundedHistory`] from youngest
/// to oldest.
///
/// Created by [`BoundedHistory::iter_mut()`].
pub struct IterMut<'a, T> {
    slots: SlotsMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    /// `newer` holds the slots before the write cursor, `older` the slots from the write
    /// cursor onward. Both are walked back to front.
    pub(crate) fn new(newer: &'a mut [T], older: &'a mut [T]) -> Self {
        Self {
            slots: newer.iter_mut().rev().chain(older.iter_mut().rev()),
        }
    }
}

impl<T> fmt::Debug for IterMut<'_, T> {
    #[cfg_attr(test, mutants::skip)] // Nothing to assert on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next_back()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}
