//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;

// == Cache Entry ==
/// A stored value and the instant after which it is stale.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value, shared with every reader
    pub value: Arc<V>,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl_ms` after `now_ms`.
    ///
    /// A zero or negative TTL yields an entry that is stale right away.
    pub fn new(value: Arc<V>, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now_ms`.
    ///
    /// The boundary instant itself is still valid: an entry read at exactly
    /// `expires_at` is a hit.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }
}
