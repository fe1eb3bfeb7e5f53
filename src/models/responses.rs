//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for a cache hit (POST /context/lookup)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// The key the descriptor quantized to
    pub key: String,
    /// The cached payload
    pub value: String,
}

impl LookupResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for PUT /context
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /users/:user_id
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub user_id: String,
    /// Number of entries dropped, 0 if the user had none
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(user_id: impl Into<String>, removed: usize) -> Self {
        let user_id = user_id.into();
        Self {
            message: format!("Invalidated {} entries for user '{}'", removed, user_id),
            user_id,
            removed,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", removed),
            removed,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Counters;

    #[test]
    fn test_lookup_response_serialize() {
        let resp = LookupResponse::new("u1|inc:low", "payload");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("u1|inc:low"));
        assert!(json.contains("payload"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("u1", 3);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["removed"], 3);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            size: 5,
            oldest_entry_age_ms: Some(10),
            counters: Counters {
                hits: 80,
                misses: 20,
                ..Counters::default()
            },
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["size"], 5);
        assert_eq!(json["hits"], 80);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
