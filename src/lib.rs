//! Context Cache - result cache for expensive AI context assembly
//!
//! Caches the assembled instruction payload for a user's financial context,
//! keyed by band-quantized descriptors, with TTL expiration, bounded
//! insertion-order eviction and per-user invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ContextCache;
pub use config::Config;
pub use context::{ContextDescriptor, ExperienceLevel};
pub use tasks::spawn_sweep_task;
