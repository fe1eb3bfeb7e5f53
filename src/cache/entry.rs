//! Cache Entry Module
//!
//! A stored value paired with the time it was inserted.

// == Cache Entry ==
/// Represents a single cache entry.
///
/// Entries are never mutated after insertion; a new `set` replaces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The assembled context payload
    pub value: String,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: String, inserted_at: u64) -> Self {
        Self { value, inserted_at }
    }

    // == Age ==
    /// Milliseconds since insertion, zero if the clock went backwards.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl_ms`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// fresh; it becomes stale once strictly more than TTL has elapsed.
    pub fn is_stale(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("payload".to_string(), 1_000);

        assert_eq!(entry.value, "payload");
        assert_eq!(entry.inserted_at, 1_000);
        assert!(!entry.is_stale(1_000, 60_000));
    }

    #[test]
    fn test_entry_stale_boundary_condition() {
        let entry = CacheEntry::new("payload".to_string(), 1_000);

        // Exactly TTL elapsed: still fresh
        assert!(!entry.is_stale(61_000, 60_000));
        // One millisecond past TTL: stale
        assert!(entry.is_stale(61_001, 60_000));
    }

    #[test]
    fn test_entry_age_with_clock_skew() {
        let entry = CacheEntry::new("payload".to_string(), 5_000);

        assert_eq!(entry.age_ms(4_000), 0);
        assert!(!entry.is_stale(4_000, 0));
    }
}
