//! Context Cache Module
//!
//! Thread-safe cache over context descriptors. This is the object the host
//! process constructs once and hands to every caller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, CacheStore};
use crate::context::{cache_key, CacheKey, ContextDescriptor};

// == Context Cache ==
/// Shared handle to one cache instance.
///
/// Cloning is cheap and every clone sees the same entries. Each operation
/// runs entirely under a single lock, so check-then-delete in `get` and
/// check-capacity-then-evict-then-insert in `set` are never interleaved.
#[derive(Debug, Clone)]
pub struct ContextCache {
    store: Arc<Mutex<CacheStore>>,
}

impl ContextCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        // A panic under the lock can at worst lose one update
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Derives the key a descriptor maps to.
    pub fn key_for(&self, ctx: &ContextDescriptor) -> CacheKey {
        cache_key(ctx)
    }

    // == Get ==
    /// Returns the cached payload for `ctx`, or None on a miss.
    pub fn get(&self, ctx: &ContextDescriptor) -> Option<String> {
        let key = cache_key(ctx);
        self.lock().get(&key)
    }

    // == Set ==
    /// Stores the payload computed for `ctx`.
    pub fn set(&self, ctx: &ContextDescriptor, value: impl Into<String>) {
        let key = cache_key(ctx);
        self.lock().set(key, value.into());
    }

    // == Invalidate User ==
    /// Drops every entry belonging to `user_id`. Returns how many were removed.
    pub fn invalidate_user(&self, user_id: &str) -> usize {
        self.lock().invalidate_user(user_id)
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Removes stale entries without touching fresh ones.
    pub fn sweep_expired(&self) -> usize {
        self.lock().sweep_expired()
    }

    /// Drops every entry.
    pub fn clear(&self) -> usize {
        self.lock().clear()
    }
}
