//! Cache Statistics Module
//!
//! Snapshot of store size, oldest entry age and running counters.

use serde::Serialize;

// == Counters ==
/// Running totals kept by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub hits: u64,
    /// Lookups that found nothing or found a stale entry
    pub misses: u64,
    /// Stale entries removed, lazily or by a sweep
    pub expirations: u64,
    pub evictions: u64,
    /// Entries removed by per-user invalidation
    pub invalidations: u64,
}

// == Cache Stats ==
/// Point-in-time view of the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Entries physically present, stale ones included
    pub size: usize,
    /// Age of the earliest-inserted present entry, None when empty
    pub oldest_entry_age_ms: Option<u64>,
    #[serde(flatten)]
    pub counters: Counters,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.counters.hits + self.counters.misses;
        if total == 0 {
            0.0
        } else {
            self.counters.hits as f64 / total as f64
        }
    }
}
