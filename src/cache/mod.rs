//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL
//! expiration.

mod engine;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use engine::LruCache;
pub use entry::CacheEntry;
pub use lru::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;
