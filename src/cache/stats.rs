//! Cache Statistics Module
//!
//! Snapshot of how many stored entries are still valid.

use serde::Serialize;

// == Cache Stats ==
/// Entry counts at the moment of the scan.
///
/// `total_entries == valid_entries + expired_entries` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of stored entries
    pub total_entries: usize,
    /// Entries that would still be returned by a read
    pub valid_entries: usize,
    /// Entries past their expiry that have not been removed yet
    pub expired_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Counts one entry as valid or expired.
    pub fn record(&mut self, expired: bool) {
        self.total_entries += 1;
        if expired {
            self.expired_entries += 1;
        } else {
            self.valid_entries += 1;
        }
    }
}
