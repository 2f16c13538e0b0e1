//! LRU Cache Server - A bounded in-memory key-value cache
//!
//! Provides LRU eviction and lazy per-entry TTL expiration behind a small
//! HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use api::AppState;
pub use cache::LruCache;
pub use config::Config;
pub use error::CacheError;
