//! Cache Store Module
//!
//! Main cache engine combining the entry table with the expiry index,
//! reconciling the two lazily on every public call.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, EntryTable, ExpiryIndex};
use crate::clock::{Clock, SystemClock};

// == TTL Cache ==
/// In-memory cache whose entries expire after a per-entry TTL.
///
/// The cache owns two structures: the [`EntryTable`] (the source of truth
/// for which keys are live) and the [`ExpiryIndex`] (a min-heap locating
/// candidate-expired keys without a full scan). Expired entries are
/// reclaimed lazily, as a side effect of `set` and `get`; there is no
/// background eviction.
///
/// Time is read through an injectable [`Clock`], so expiry behavior is
/// fully deterministic under test.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage, one entry per live key
    table: EntryTable<K, V>,
    /// Min-heap of (key, expiry) records, stale duplicates included
    index: ExpiryIndex<K>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates a new cache reading time from the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a new cache reading time from the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: EntryTable::new(),
            index: ExpiryIndex::new(),
            clock,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair that expires `ttl` from now.
    ///
    /// Overwrites any previous value for the key; the superseded expiry
    /// record stays queued in the index as a stale duplicate until
    /// reconciliation discards it. Always succeeds, including `ttl` of
    /// zero, which yields an entry already eligible for expiry on the
    /// very next call.
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        let expires_at = self.clock.now_ms().saturating_add(ttl.as_millis() as u64);

        // Reclaim before inserting, bounding stale-record growth. The
        // insertion itself is not followed by another pass.
        self.evict_expired();

        self.table.put(key.clone(), value, expires_at);
        self.index.insert(key, expires_at);
        self.stats.set_total_entries(self.table.len());
    }

    // == Get ==
    /// Retrieves the value for `key` if present and not expired.
    ///
    /// A missing key and an expired key both yield `None`; callers cannot
    /// tell the two apart.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.evict_expired();

        // Reconciliation only drains the head of the index, and the clock
        // may have advanced since it ran. Re-check the authoritative table
        // entry against a fresh reading so a caller never observes a value
        // past its expiry.
        let now = self.clock.now_ms();
        let expired = match self.table.lookup(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.table.remove(key);
            self.stats.record_expired_removal();
            self.stats.record_miss();
            self.stats.set_total_entries(self.table.len());
            return None;
        }

        self.stats.record_hit();
        self.table.lookup(key).map(|entry| &entry.value)
    }

    // == Reconciliation ==
    /// Pops and settles every index record whose expiry is at or before
    /// now.
    ///
    /// A popped record removes its table entry only when its `expires_at`
    /// matches the live entry exactly; a mismatch means the key was
    /// overwritten since the record was queued (or the entry is already
    /// gone) and the record is discarded without side effect. Each
    /// iteration shrinks the index, so the loop terminates; worst case it
    /// drains the whole index, amortized over the insertions that filled
    /// it.
    fn evict_expired(&mut self) {
        let now = self.clock.now_ms();
        let mut removed = 0usize;

        while let Some(head) = self.index.peek_earliest() {
            if head.expires_at > now {
                // Earliest expiry is in the future; nothing else can be due
                break;
            }

            let record = match self.index.pop_earliest() {
                Some(record) => record,
                // Unreachable: peek above saw a record
                None => break,
            };

            // A matching timestamp proves the record still describes the
            // live entry, which is therefore itself at or past expiry.
            let matches_live_entry = self
                .table
                .lookup(&record.key)
                .map(|entry| entry.expires_at == record.expires_at)
                .unwrap_or(false);

            if matches_live_entry {
                self.table.remove(&record.key);
                self.stats.record_expired_removal();
                removed += 1;
            } else {
                self.stats.record_stale_discard();
            }
        }

        if removed > 0 {
            self.stats.set_total_entries(self.table.len());
            debug!("lazy eviction reclaimed {} expired entries", removed);
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.table.len());
        stats
    }

    // == Length ==
    /// Returns the current number of live entries.
    ///
    /// Entries past their expiry but not yet reclaimed are counted; the
    /// next `set` or `get` collapses them.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    // == Pending Expiries ==
    /// Returns the number of queued expiry records, stale duplicates
    /// included.
    pub fn pending_expiries(&self) -> usize {
        self.index.len()
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
