//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::Duration;
use serde::Deserialize;
use serde_json::Value;

/// Request body for the PUT operation (POST /api/lru)
///
/// # Fields
/// - `key`: The cache key to store the value under; any string, empty included
/// - `value`: Any JSON value; stored as-is
/// - `ttl_seconds`: Optional TTL in seconds (the default applies if absent or not positive)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
}

impl PutRequest {
    /// Resolves the TTL for this request, falling back to `default_ttl`.
    ///
    /// A TTL too large for `Duration` saturates to the maximum.
    pub fn ttl(&self, default_ttl: Duration) -> Duration {
        match self.ttl_seconds {
            Some(secs) if secs > 0 => Duration::try_seconds(secs).unwrap_or(Duration::MAX),
            _ => default_ttl,
        }
    }
}
