//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

// == Cache Entry ==
/// A stored value together with its absolute expiration time.
///
/// Entries never read the clock themselves; callers supply "now" so that
/// time stays under the control of the owning cache's [`Clock`](crate::clock::Clock).
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring at the given timestamp.
    pub fn new(value: V, expires_at: u64) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now_ms`.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiration time, so a TTL of zero
    /// produces an entry that is already expired at the same clock reading.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}
