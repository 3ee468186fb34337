//! Cache Store Module
//!
//! Main cache engine: HashMap storage with lazy TTL expiry and prefix invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL_MS};

// == Cache Store ==
/// In-process key/value cache with per-entry TTL.
///
/// Expired entries are never swept in the background; they are dropped when a
/// read touches them or when a bulk operation removes them.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied when `set` is called without one
    default_ttl_ms: i64,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl_ms` - TTL in milliseconds for entries set without one
    pub fn new(default_ttl_ms: i64) -> Self {
        Self::with_clock(default_ttl_ms, Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(default_ttl_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl_ms,
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The replacement gets a fresh expiry; it does not inherit the old one.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store, owned or already shared
    /// * `ttl_ms` - Optional TTL in milliseconds (uses the default if None)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Arc<V>>, ttl_ms: Option<i64>) {
        let now = self.clock.now_ms();
        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries
            .insert(key.into(), CacheEntry::new(value.into(), now, ttl));
    }

    // == Get ==
    /// Returns the value stored under `key` if it has not expired.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        let now = self.clock.now_ms();
        let expired = self.entries.get(key)?.is_expired_at(now);

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    // == Invalidate By Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Matching is a literal string prefix. Returns the number of entries removed.
    pub fn invalidate_by_prefix(&mut self, prefix: &str) -> usize {
        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &doomed {
            self.entries.remove(key);
        }

        doomed.len()
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Counts valid and expired entries without removing any.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        self.entries
            .values()
            .fold(CacheStats::new(), |mut stats, entry| {
                stats.record(entry.is_expired_at(now));
                stats
            })
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// TTL in milliseconds used when `set` gets none.
    pub fn default_ttl_ms(&self) -> i64 {
        self.default_ttl_ms
    }
}
