//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, bounded eviction and
//! per-user invalidation.

mod clock;
mod context_cache;
mod entry;
mod eviction;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use context_cache::ContextCache;
pub use entry::CacheEntry;
pub use eviction::{EvictionPolicy, OrderTracker};
pub use stats::{CacheStats, Counters};
pub use store::CacheStore;

// == Public Constants ==
/// Default time-to-live for entries
pub const DEFAULT_TTL_SECS: u64 = 60 * 60;

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 500;
