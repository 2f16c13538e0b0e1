//! API Handlers
//!
//! HTTP request handlers translating requests into cache operations and
//! cache outcomes into responses.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetAllResponse, GetResponse, HealthResponse, PutRequest, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache synchronizes itself, so the state only needs shared ownership.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache of opaque JSON values
    pub cache: Arc<LruCache<Value>>,
    /// TTL applied when a request carries none
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: LruCache<Value>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(LruCache::new(config.cache_size), config.default_ttl)
    }
}

/// Logs a failed cache call at a level matching its severity.
fn log_failure(operation: &str, key: Option<&str>, err: &CacheError) {
    match err {
        CacheError::NotFound(_) | CacheError::CacheEmpty | CacheError::InvalidRequest(_) => {
            debug!(operation, key, error = %err, "cache request not fulfilled")
        }
        CacheError::Internal(_) => {
            warn!(operation, key, error = %err, "cache request failed")
        }
    }
}

/// Handler for POST /api/lru
///
/// Stores a key-value pair, using the default TTL unless a positive
/// `ttl_seconds` is given.
pub async fn put_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PutRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(req) = payload.map_err(|rejection| {
        let err = CacheError::InvalidRequest(rejection.body_text());
        log_failure("put", None, &err);
        err
    })?;

    let ttl = req.ttl(state.default_ttl);
    state
        .cache
        .put(req.key.clone(), req.value, ttl)
        .inspect_err(|err| log_failure("put", Some(&req.key), err))?;

    debug!(key = %req.key, ttl_secs = ttl.num_seconds(), "created a key");
    Ok(StatusCode::CREATED)
}

/// Handler for GET /api/lru/:key
///
/// Retrieves a value and its expiration time.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let (value, expires_at) = state
        .cache
        .get(&key)
        .inspect_err(|err| log_failure("get", Some(&key), err))?;

    debug!(key = %key, %expires_at, "got data by key");
    Ok(Json(GetResponse::new(key, value, expires_at)))
}

/// Handler for GET /api/lru
///
/// Returns every cached key with its value; 204 when the cache is empty.
pub async fn get_all_handler(State(state): State<AppState>) -> Result<Json<GetAllResponse>> {
    let (keys, values) = state
        .cache
        .get_all()
        .inspect_err(|err| log_failure("get_all", None, err))?;

    debug!(count = keys.len(), "got all keys");
    Ok(Json(GetAllResponse::new(keys, values)))
}

/// Handler for DELETE /api/lru/:key
pub async fn evict_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state
        .cache
        .evict(&key)
        .inspect_err(|err| log_failure("evict", Some(&key), err))?;

    debug!(key = %key, "deleted a key");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /api/lru
pub async fn evict_all_handler(State(state): State<AppState>) -> Result<StatusCode> {
    state
        .cache
        .evict_all()
        .inspect_err(|err| log_failure("evict_all", None, err))?;

    debug!("deleted all keys");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state
        .cache
        .stats()
        .inspect_err(|err| log_failure("stats", None, err))?;

    Ok(Json(StatsResponse::new(&stats, state.cache.capacity())))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
