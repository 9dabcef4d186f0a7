#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! An insertion-ordered log that trims in bulk once it grows past a cap.
//!
//! A [`BoundedLog`] differs from a classic ring buffer: instead of evicting
//! one element per push once full, it lets the log grow up to `capacity`
//! entries and, on the push that exceeds it, drops the oldest entries so that
//! only the most recent `retain` remain. Bulk trimming keeps the amortized
//! cost of a push O(1) while still bounding memory.
//!
//! # Invariants
//! - `len() <= capacity()` after every public operation.
//! - Iteration order is always oldest to newest.
//! - `retain` is clamped to `1..=capacity`.

use std::collections::VecDeque;

/// Insertion-ordered log with high/low watermark trimming.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "foundation")]
/// # {
/// use hoursguard_common::collections::BoundedLog;
///
/// let mut log = BoundedLog::new(3, 1);
/// log.push("a");
/// log.push("b");
/// log.push("c");
/// assert_eq!(log.len(), 3);
///
/// log.push("d"); // exceeds the cap, keep only the newest entry
/// assert_eq!(log.to_vec(), vec!["d"]);
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedLog<T> {
    buf: VecDeque<T>,
    capacity: usize,
    retain: usize,
}

impl<T> BoundedLog<T> {
    /// Creates an empty log that holds at most `capacity` entries and trims
    /// down to the newest `retain` entries when that cap is exceeded.
    ///
    /// A capacity of zero is clamped to `1`.
    #[inline]
    #[must_use]
    pub fn new(capacity: usize, retain: usize) -> Self {
        let capacity = capacity.max(1);
        let retain = retain.clamp(1, capacity);
        Self { buf: VecDeque::with_capacity(capacity.min(1024)), capacity, retain }
    }

    /// Appends an entry, trimming to the newest `retain` entries if the log
    /// now holds more than `capacity`.
    ///
    /// Returns the number of entries evicted by this push.
    pub fn push(&mut self, item: T) -> usize {
        self.buf.push_back(item);
        if self.buf.len() > self.capacity {
            let evicted = self.buf.len() - self.retain;
            self.buf.drain(..evicted);
            evicted
        } else {
            0
        }
    }

    /// Returns the number of entries currently stored.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` when the log has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the high watermark.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the low watermark applied after an overflow.
    #[inline]
    #[must_use]
    pub fn retain(&self) -> usize {
        self.retain
    }

    /// Removes all entries, leaving the watermarks unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Returns an iterator visiting entries from oldest to newest.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Returns an owned copy of the entries, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.buf.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a BoundedLog<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

/// Truncates `items` from the front so that at most `limit` of the newest
/// entries remain.
pub fn keep_last<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        let excess = items.len() - limit;
        items.drain(..excess);
    }
}
