//! Expiry Index Module
//!
//! Min-heap of (key, expiry) records ordered by expiration time ascending,
//! used to find candidate-expired keys without scanning the whole table.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

// == Expiry Record ==
/// A (key, expiry) pair queued for reclamation.
///
/// Every `set` pushes one record; records are only ever removed by being
/// popped. A record whose `expires_at` no longer matches the live entry
/// for its key is a stale duplicate and carries no authority.
#[derive(Debug, Clone)]
pub struct ExpiryRecord<K> {
    /// The key this record refers to
    pub key: K,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

// Ordering compares expiry times only. Records with equal expiry are
// considered equal, so ties between different keys break arbitrarily and
// `K` needs no `Ord` bound.
impl<K> PartialEq for ExpiryRecord<K> {
    fn eq(&self, other: &Self) -> bool {
        self.expires_at == other.expires_at
    }
}

impl<K> Eq for ExpiryRecord<K> {}

impl<K> PartialOrd for ExpiryRecord<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for ExpiryRecord<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expires_at.cmp(&other.expires_at)
    }
}

// == Expiry Index ==
/// Priority ordering of [`ExpiryRecord`]s, earliest expiry first.
///
/// `BinaryHeap` is a max-heap, so records are stored wrapped in `Reverse`.
#[derive(Debug)]
pub struct ExpiryIndex<K> {
    /// Min-heap by expiration time
    heap: BinaryHeap<Reverse<ExpiryRecord<K>>>,
}

impl<K> ExpiryIndex<K> {
    // == Constructor ==
    /// Creates a new empty expiry index.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    // == Insert ==
    /// Pushes a new record in O(log n).
    ///
    /// Inserting the same key repeatedly is expected; older records for
    /// the key become stale duplicates.
    pub fn insert(&mut self, key: K, expires_at: u64) {
        self.heap.push(Reverse(ExpiryRecord { key, expires_at }));
    }

    // == Peek Earliest ==
    /// Returns the record with the smallest expiry without removing it.
    pub fn peek_earliest(&self) -> Option<&ExpiryRecord<K>> {
        self.heap.peek().map(|Reverse(record)| record)
    }

    // == Pop Earliest ==
    /// Removes and returns the record with the smallest expiry in O(log n).
    ///
    /// Returns `None` on an empty index; callers check `peek_earliest`
    /// first, which keeps the empty-pop programming error unreachable.
    pub fn pop_earliest(&mut self) -> Option<ExpiryRecord<K>> {
        self.heap.pop().map(|Reverse(record)| record)
    }

    // == Length ==
    /// Returns the number of queued records, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    // == Is Empty ==
    /// Returns true if no records are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K> Default for ExpiryIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
