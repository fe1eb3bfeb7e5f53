//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, info};

use crate::cache::{CacheStore, ContextCache};
use crate::config::Config;
use crate::context::ContextDescriptor;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_descriptor, ClearResponse, HealthResponse, InvalidateResponse, LookupResponse,
    SetContextRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the single cache instance for this process.
#[derive(Clone)]
pub struct AppState {
    pub cache: ContextCache,
}

impl AppState {
    pub fn new(cache: ContextCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the cache store with parameters from the Config.
    pub fn from_config(config: &Config) -> Self {
        let store = CacheStore::new(config.max_entries, config.ttl_duration())
            .with_policy(config.eviction_policy);
        Self::new(ContextCache::new(store))
    }
}

/// Handler for POST /context/lookup
///
/// Returns the cached payload for a descriptor, or 404 on a miss. A body that
/// cannot be turned into a key is reported as a miss too.
pub async fn lookup_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContextDescriptor>, JsonRejection>,
) -> Result<Json<LookupResponse>> {
    let ctx = match payload {
        Ok(Json(ctx)) => ctx,
        Err(rejection) => {
            debug!("Unkeyable lookup body: {}", rejection.body_text());
            return Err(CacheError::Miss("unkeyable descriptor".to_string()));
        }
    };
    if let Some(error_msg) = validate_descriptor(&ctx) {
        debug!("Unkeyable lookup descriptor: {}", error_msg);
        return Err(CacheError::Miss("unkeyable descriptor".to_string()));
    }

    let key = state.cache.key_for(&ctx);
    match state.cache.get(&ctx) {
        Some(value) => Ok(Json(LookupResponse::new(key.into_string(), value))),
        None => Err(CacheError::Miss(key.into_string())),
    }
}

/// Handler for PUT /context
///
/// Stores the payload computed for a descriptor.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetContextRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = state.cache.key_for(&req.context);
    state.cache.set(&req.context, req.value);

    Ok(Json(SetResponse::new(key.into_string())))
}

/// Handler for DELETE /users/:user_id
///
/// Drops every entry of one user. Unknown users are not an error.
pub async fn invalidate_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_user(&user_id);
    Json(InvalidateResponse::new(user_id, removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for DELETE /cache
///
/// Drops every entry. Counters survive.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear();
    info!("Cache cleared: removed {} entries", removed);
    Json(ClearResponse::new(removed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
