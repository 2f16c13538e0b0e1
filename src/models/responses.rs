//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /api/lru/:key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
    /// Expiration instant as Unix seconds
    pub expires_at: i64,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value, expires_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value,
            expires_at: expires_at.timestamp(),
        }
    }
}

/// Response body for the GET-ALL operation (GET /api/lru)
///
/// `keys[i]` is stored with `values[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAllResponse {
    pub keys: Vec<String>,
    pub values: Vec<Value>,
}

impl GetAllResponse {
    pub fn new(keys: Vec<String>, values: Vec<Value>) -> Self {
        Self { keys, values }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of expired entries removed on access
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions that carry a body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let expires_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let resp = GetResponse::new("test_key", json!({"n": 1}), expires_at);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["key"], "test_key");
        assert_eq!(json["value"], json!({"n": 1}));
        assert_eq!(json["expires_at"], 1_700_000_000);
    }

    #[test]
    fn test_get_all_response_serialize() {
        let resp = GetAllResponse::new(vec!["a".to_string()], vec![json!(1)]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"keys": ["a"], "values": [1]}));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new();
        for hit in [true, true, true, true, false] {
            stats.record_lookup(hit);
        }
        stats.record_expiration();

        let resp = StatsResponse::new(&stats.snapshot(3), 10);
        assert_eq!(resp.total_entries, 3);
        assert_eq!(resp.capacity, 10);
        assert_eq!(resp.expirations, 1);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
