//! Expired Entry Sweep Task
//!
//! Background task that periodically removes expired cache entries so a
//! long-lived process does not hold stale payloads nobody reads again.
//! Reads already treat stale entries as misses; the sweep only frees memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ContextCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// # Arguments
/// * `cache` - Shared cache handle
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ContextCache::new(CacheStore::new(500, Duration::from_secs(3600)));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 300);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: ContextCache, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired entry sweep with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired();

            if removed > 0 {
                info!("Sweep: removed {} expired entries", removed);
            } else {
                debug!("Sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, ManualClock};
    use crate::context::ContextDescriptor;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(3600);

    fn manual_cache() -> (ContextCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let store = CacheStore::new(100, TTL).with_clock(clock.clone());
        (ContextCache::new(store), clock)
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let (cache, clock) = manual_cache();
        cache.set(&ContextDescriptor::new("u1"), "stale");
        clock.advance(TTL + Duration::from_secs(1));
        cache.set(&ContextDescriptor::new("u2"), "fresh");

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let stats = cache.stats();
        assert_eq!(stats.size, 1, "Expired entry should have been swept");
        assert_eq!(stats.counters.expirations, 1);
        assert_eq!(cache.get(&ContextDescriptor::new("u2")), Some("fresh".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let (cache, _) = manual_cache();
        cache.set(&ContextDescriptor::new("u1"), "value");

        let handle = spawn_sweep_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.get(&ContextDescriptor::new("u1")), Some("value".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _) = manual_cache();

        let handle = spawn_sweep_task(cache, 1);
        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
