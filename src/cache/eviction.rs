//! Eviction Module
//!
//! Tracks entry order for capacity-driven eviction.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::context::CacheKey;

// == Eviction Policy ==
/// Which order the store evicts in when it is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Evict the earliest-inserted entry. Reads never reorder entries.
    #[default]
    InsertionOrder,
    /// Evict the least recently used entry. Hits move an entry to the front.
    AccessOrder,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::InsertionOrder => "fifo",
            EvictionPolicy::AccessOrder => "lru",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "insertion" => Ok(EvictionPolicy::InsertionOrder),
            "lru" | "access" => Ok(EvictionPolicy::AccessOrder),
            other => Err(format!("unknown eviction policy: {}", other)),
        }
    }
}

// == Order Tracker ==
/// Keeps keys in eviction order.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently inserted (or used, under `AccessOrder`)
/// - Back = Next to be evicted
#[derive(Debug, Default)]
pub struct OrderTracker {
    order: VecDeque<CacheKey>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push Front ==
    /// Moves `key` to the front, adding it if untracked.
    ///
    /// Linear in the number of tracked keys. Fine at the few hundred entries
    /// the cache is sized for; larger capacities want an indexed list.
    pub fn push_front(&mut self, key: &CacheKey) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
    }

    /// Keeps only the keys matching `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&CacheKey) -> bool) {
        self.order.retain(keep);
    }

    // == Evict Oldest ==
    /// Returns and removes the key at the back.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> CacheKey {
        CacheKey::from(raw)
    }

    #[test]
    fn test_tracker_new() {
        let tracker = OrderTracker::new();
        assert!(tracker.order.is_empty());
        assert_eq!(tracker.order.len(), 0);
    }

    #[test]
    fn test_tracker_insertion_order() {
        let mut tracker = OrderTracker::new();

        tracker.push_front(&key("a"));
        tracker.push_front(&key("b"));
        tracker.push_front(&key("c"));

        assert_eq!(tracker.order.len(), 3);
        assert_eq!(tracker.order.back(), Some(&key("a")));
    }

    #[test]
    fn test_tracker_reinsert_moves_to_front() {
        let mut tracker = OrderTracker::new();

        tracker.push_front(&key("a"));
        tracker.push_front(&key("b"));
        tracker.push_front(&key("a"));

        assert_eq!(tracker.order.len(), 2);
        assert_eq!(tracker.evict_oldest(), Some(key("b")));
        assert_eq!(tracker.evict_oldest(), Some(key("a")));
        assert_eq!(tracker.evict_oldest(), None);
    }

    #[test]
    fn test_tracker_remove_and_retain() {
        let mut tracker = OrderTracker::new();

        tracker.push_front(&key("u1|x"));
        tracker.push_front(&key("u2|x"));
        tracker.push_front(&key("u1|y"));

        tracker.remove(&key("nonexistent"));
        assert_eq!(tracker.order.len(), 3);

        tracker.retain(|k| !k.belongs_to("u1"));
        assert_eq!(tracker.order.len(), 1);
        assert!(tracker.order.contains(&key("u2|x")));

        tracker.clear();
        assert!(tracker.order.is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("fifo".parse::<EvictionPolicy>(), Ok(EvictionPolicy::InsertionOrder));
        assert_eq!(" LRU ".parse::<EvictionPolicy>(), Ok(EvictionPolicy::AccessOrder));
        assert!("random".parse::<EvictionPolicy>().is_err());
        assert_eq!(EvictionPolicy::default().to_string(), "fifo");
    }
}
