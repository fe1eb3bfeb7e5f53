//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with order tracking, lazy TTL
//! expiration and capacity-bounded eviction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{
    CacheEntry, CacheStats, Clock, Counters, EvictionPolicy, OrderTracker, SystemClock,
};
use crate::context::CacheKey;

// == Cache Store ==
/// Bounded key-value storage with TTL expiration.
///
/// Not synchronized; wrap it in a lock to share it (see `ContextCache`).
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<CacheKey, CacheEntry>,
    order: OrderTracker,
    counters: Counters,
    /// Maximum number of entries allowed, at least 1
    max_entries: usize,
    ttl_ms: u64,
    policy: EvictionPolicy,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store using the wall clock and insertion-order eviction.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries (a value of 0 is raised to 1)
    /// * `ttl` - How long an entry stays eligible to be returned
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: OrderTracker::new(),
            counters: Counters::default(),
            max_entries: max_entries.max(1),
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            policy: EvictionPolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Stale entries are removed on the spot and reported as misses.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        let now = self.clock.now_ms();

        let stale = match self.entries.get(key) {
            None => {
                self.counters.misses += 1;
                return None;
            }
            Some(entry) => entry.is_stale(now, self.ttl_ms),
        };

        if stale {
            self.entries.remove(key);
            self.order.remove(key);
            self.counters.expirations += 1;
            self.counters.misses += 1;
            debug!(key = %key, "cache entry expired");
            return None;
        }

        if self.policy == EvictionPolicy::AccessOrder {
            self.order.push_front(key);
        }
        self.counters.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Inserts or overwrites an entry, stamping it with the current time.
    ///
    /// If the key is new and the store is full, exactly one entry is evicted
    /// first. An overwrite counts as a fresh insertion for eviction order.
    pub fn set(&mut self, key: CacheKey, value: String) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_one();
        }

        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.order.push_front(&key);
        self.entries.insert(key, entry);
    }

    // == Evict ==
    /// Removes the entry at the back of the eviction order.
    fn evict_one(&mut self) {
        if let Some(evicted) = self.order.evict_oldest() {
            self.entries.remove(&evicted);
            self.counters.evictions += 1;
            debug!(key = %evicted, policy = %self.policy, "cache entry evicted");
        }
    }

    // == Invalidate User ==
    /// Removes every entry whose leading key component is `user_id`,
    /// regardless of freshness.
    ///
    /// Returns the number of entries removed; zero is a silent no-op.
    pub fn invalidate_user(&mut self, user_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.belongs_to(user_id));
        self.order.retain(|key| !key.belongs_to(user_id));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.counters.invalidations += removed as u64;
            debug!(user_id, removed, "invalidated user cache entries");
        }
        removed
    }

    // == Stats ==
    /// Returns a snapshot without expiring anything.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let oldest_entry_age_ms = self
            .entries
            .values()
            .map(|entry| entry.inserted_at)
            .min()
            .map(|inserted_at| now.saturating_sub(inserted_at));

        CacheStats {
            size: self.entries.len(),
            oldest_entry_age_ms,
            counters: self.counters,
        }
    }

    // == Sweep Expired ==
    /// Removes all stale entries.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, ttl_ms));
        let entries = &self.entries;
        self.order.retain(|key| entries.contains_key(key));

        let removed = before - self.entries.len();
        if removed > 0 {
            self.counters.expirations += removed as u64;
            debug!(removed, "swept expired cache entries");
        }
        removed
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_secs(3600);

    fn key(raw: &str) -> CacheKey {
        CacheKey::from(raw)
    }

    fn manual_store(max_entries: usize) -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let store = CacheStore::new(max_entries, TTL).with_clock(clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl(), TTL);
        assert_eq!(store.policy(), EvictionPolicy::InsertionOrder);
    }

    #[test]
    fn test_store_zero_capacity_raised_to_one() {
        let mut store = CacheStore::new(0, TTL);
        store.set(key("a"), "1".to_string());
        store.set(key("b"), "2".to_string());

        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key("b")), Some("2".to_string()));
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = manual_store(100);

        store.set(key("u1|a"), "value1".to_string());

        assert_eq!(store.get(&key("u1|a")), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = manual_store(100);
        assert_eq!(store.get(&key("missing")), None);
    }

    #[test]
    fn test_store_overwrite_resets_timestamp() {
        let (mut store, clock) = manual_store(100);

        store.set(key("a"), "v1".to_string());
        clock.advance(Duration::from_secs(3000));
        store.set(key("a"), "v2".to_string());
        clock.advance(Duration::from_secs(3000));

        // 6000s after the first set but only 3000s after the overwrite
        assert_eq!(store.get(&key("a")), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut store, clock) = manual_store(100);

        store.set(key("a"), "v".to_string());

        clock.advance(TTL);
        assert_eq!(store.get(&key("a")), Some("v".to_string()));

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.get(&key("a")), None);
        assert!(store.is_empty(), "stale entry should be removed on read");
    }

    #[test]
    fn test_store_stale_entry_stays_until_read() {
        let (mut store, clock) = manual_store(100);

        store.set(key("a"), "v".to_string());
        clock.advance(TTL + Duration::from_secs(1));

        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().size, 1);
        assert_eq!(store.get(&key("a")), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_fifo_eviction_scenario() {
        let (mut store, _) = manual_store(2);

        store.set(key("A"), "a".to_string());
        store.set(key("B"), "b".to_string());
        store.set(key("C"), "c".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key("A")), None);
        assert_eq!(store.get(&key("B")), Some("b".to_string()));
        assert_eq!(store.get(&key("C")), Some("c".to_string()));
    }

    #[test]
    fn test_store_fifo_ignores_reads() {
        let (mut store, _) = manual_store(3);

        store.set(key("k1"), "v1".to_string());
        store.set(key("k2"), "v2".to_string());
        store.set(key("k3"), "v3".to_string());

        // Reading k1 does not protect it
        store.get(&key("k1"));
        store.get(&key("k1"));

        store.set(key("k4"), "v4".to_string());

        assert_eq!(store.get(&key("k1")), None);
        assert!(store.get(&key("k2")).is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let (store, _) = manual_store(3);
        let mut store = store.with_policy(EvictionPolicy::AccessOrder);

        store.set(key("k1"), "v1".to_string());
        store.set(key("k2"), "v2".to_string());
        store.set(key("k3"), "v3".to_string());

        store.get(&key("k1"));
        store.set(key("k4"), "v4".to_string());

        assert!(store.get(&key("k1")).is_some());
        assert_eq!(store.get(&key("k2")), None);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let (mut store, _) = manual_store(2);

        store.set(key("a"), "1".to_string());
        store.set(key("b"), "2".to_string());
        store.set(key("a"), "3".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().counters.evictions, 0);
        assert_eq!(store.get(&key("b")), Some("2".to_string()));
    }

    #[test]
    fn test_store_overwrite_moves_to_newest() {
        let (mut store, _) = manual_store(2);

        store.set(key("a"), "1".to_string());
        store.set(key("b"), "2".to_string());
        store.set(key("a"), "1b".to_string());
        store.set(key("c"), "3".to_string());

        assert_eq!(store.get(&key("b")), None);
        assert_eq!(store.get(&key("a")), Some("1b".to_string()));
    }

    #[test]
    fn test_store_invalidate_user() {
        let (mut store, _) = manual_store(100);

        store.set(key("u1|inc:low"), "a".to_string());
        store.set(key("u1|inc:mid"), "b".to_string());
        store.set(key("u10|inc:low"), "c".to_string());
        store.set(key("u2|inc:low"), "d".to_string());

        assert_eq!(store.invalidate_user("u1"), 2);

        assert_eq!(store.get(&key("u1|inc:low")), None);
        assert_eq!(store.get(&key("u1|inc:mid")), None);
        assert_eq!(store.get(&key("u10|inc:low")), Some("c".to_string()));
        assert_eq!(store.get(&key("u2|inc:low")), Some("d".to_string()));
        assert_eq!(store.stats().counters.invalidations, 2);
    }

    #[test]
    fn test_store_invalidate_unknown_user_is_noop() {
        let (mut store, _) = manual_store(100);
        store.set(key("u1|x"), "a".to_string());

        assert_eq!(store.invalidate_user("ghost"), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_invalidate_removes_stale_entries_too() {
        let (mut store, clock) = manual_store(100);
        store.set(key("u1|x"), "a".to_string());
        clock.advance(TTL * 2);

        assert_eq!(store.invalidate_user("u1"), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_invalidated_slot_reused_without_eviction() {
        let (mut store, _) = manual_store(2);

        store.set(key("u1|x"), "a".to_string());
        store.set(key("u2|x"), "b".to_string());
        store.invalidate_user("u1");
        store.set(key("u3|x"), "c".to_string());

        assert_eq!(store.stats().counters.evictions, 0);
        assert_eq!(store.get(&key("u2|x")), Some("b".to_string()));
    }

    #[test]
    fn test_store_stats() {
        let (mut store, clock) = manual_store(100);

        assert_eq!(store.stats().oldest_entry_age_ms, None);

        store.set(key("a"), "1".to_string());
        clock.advance(Duration::from_millis(250));
        store.set(key("b"), "2".to_string());
        clock.advance(Duration::from_millis(750));

        store.get(&key("a"));
        store.get(&key("nonexistent"));

        let stats = store.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.oldest_entry_age_ms, Some(1_000));
        assert_eq!(stats.counters.hits, 1);
        assert_eq!(stats.counters.misses, 1);
    }

    #[test]
    fn test_store_sweep_expired() {
        let (mut store, clock) = manual_store(100);

        store.set(key("old"), "1".to_string());
        clock.advance(Duration::from_secs(1800));
        store.set(key("new"), "2".to_string());
        clock.advance(Duration::from_secs(1801));

        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key("new")), Some("2".to_string()));
        assert_eq!(store.stats().counters.expirations, 1);
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _) = manual_store(100);

        store.set(key("a"), "1".to_string());
        store.set(key("b"), "2".to_string());

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().oldest_entry_age_ms, None);
    }

    #[test]
    fn test_store_huge_ttl_saturates() {
        let clock = Arc::new(ManualClock::new(0));
        let mut store = CacheStore::new(10, Duration::from_secs(18_446_744_073_709_552))
            .with_clock(clock.clone());
        assert_eq!(store.ttl(), Duration::from_millis(u64::MAX));

        store.set(key("a"), "1".to_string());
        clock.advance(Duration::from_secs(365 * 24 * 3600));
        assert_eq!(store.get(&key("a")), Some("1".to_string()));
    }
}
