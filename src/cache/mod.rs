//! Cache Module
//!
//! Provides an in-memory cache with lazy TTL expiration and prefix invalidation.

mod clock;
mod entry;
mod key;
mod stats;
mod store;


use std::sync::Arc;
use tokio::sync::RwLock;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{generate_key, KeyParam};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL applied when none is given: 5 minutes
pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

/// A cache shared across tasks. The lock makes every operation one critical section.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;
