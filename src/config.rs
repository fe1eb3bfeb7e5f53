//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{EvictionPolicy, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Entry time-to-live in seconds
    pub ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Active sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
    pub eviction_policy: EvictionPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 500)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 300)
    /// - `EVICTION_POLICY` - `fifo` or `lru` (default: fifo)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            ttl: parse_var("CACHE_TTL").unwrap_or(defaults.ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            eviction_policy: env::var("EVICTION_POLICY")
                .ok()
                .and_then(|v| {
                    v.parse::<EvictionPolicy>()
                        .map_err(|e| {
                            warn!("{}, falling back to fifo", e);
                        })
                        .ok()
                })
                .unwrap_or(defaults.eviction_policy),
        }
    }

    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL_SECS,
            server_port: 3000,
            sweep_interval: 300,
            eviction_policy: EvictionPolicy::InsertionOrder,
        }
    }
}
