//! Cache Engine Module
//!
//! Thread-safe front of the cache store. A single mutex guards the index and
//! the recency list together; every operation holds it from start to finish.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Bounded LRU cache with per-entry TTL, safe to share across threads.
///
/// Reads also reorder recency, so there is no reader/writer split: `get`
/// takes the same exclusive lock as `put`.
#[derive(Debug)]
pub struct LruCache<V> {
    store: Mutex<CacheStore<V>>,
    capacity: usize,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(capacity)),
            capacity,
        }
    }

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// A zero or negative `ttl` is accepted; the entry reads as expired on
    /// its next access.
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()> {
        self.lock()?.put(key.into(), value, ttl);
        Ok(())
    }

    /// Returns the value stored under `key` and its expiration instant.
    pub fn get(&self, key: &str) -> Result<(V, DateTime<Utc>)>
    where
        V: Clone,
    {
        self.lock()?.get(key)
    }

    /// Returns a snapshot of every indexed key and value.
    pub fn get_all(&self) -> Result<(Vec<String>, Vec<V>)>
    where
        V: Clone,
    {
        self.lock()?.get_all()
    }

    /// Removes `key` and returns its value.
    pub fn evict(&self, key: &str) -> Result<V> {
        self.lock()?.evict(key)
    }

    /// Removes every entry.
    pub fn evict_all(&self) -> Result<()> {
        self.lock()?.evict_all();
        Ok(())
    }

    pub fn stats(&self) -> Result<CacheStats> {
        Ok(self.lock()?.stats())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheStore<V>>> {
        self.store
            .lock()
            .map_err(|_| CacheError::Internal("cache lock poisoned".to_string()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cache_lru_scenario() {
        let cache = LruCache::new(5);
        for i in 0..5 {
            cache.put(i.to_string(), i, Duration::hours(1)).unwrap();
        }
        cache.put("5", 5, Duration::hours(1)).unwrap();

        assert!(matches!(cache.get("0"), Err(CacheError::NotFound(_))));
        assert_eq!(cache.get("5").unwrap().0, 5);
    }

    #[test]
    fn test_cache_lazy_ttl_scenario() {
        let cache = LruCache::new(5);
        cache.put("0", 0, Duration::milliseconds(15)).unwrap();

        thread::sleep(std::time::Duration::from_millis(100));

        assert!(matches!(cache.get("0"), Err(CacheError::NotFound(_))));
        assert_eq!(cache.len().unwrap(), 0);
    }

    #[test]
    fn test_cache_update_scenario() {
        let cache = LruCache::new(5);
        cache.put("0", "a", Duration::minutes(1)).unwrap();
        let (v1, t1) = cache.get("0").unwrap();

        cache.put("0", "b", Duration::hours(2)).unwrap();
        let (v2, t2) = cache.get("0").unwrap();

        assert_eq!(v1, "a");
        assert_eq!(v2, "b");
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_cache_empty_vs_absent() {
        let cache: LruCache<i32> = LruCache::new(5);

        assert_eq!(cache.get_all(), Err(CacheError::CacheEmpty));
        assert_eq!(cache.evict("0"), Err(CacheError::CacheEmpty));
        assert!(matches!(cache.get("0"), Err(CacheError::NotFound(_))));

        cache.put("1", 1, Duration::hours(1)).unwrap();
        assert!(matches!(cache.get("0"), Err(CacheError::NotFound(_))));
        assert!(matches!(cache.evict("0"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_cache_evict_all_twice() {
        let cache = LruCache::new(5);
        cache.put("0", 0, Duration::hours(1)).unwrap();

        assert!(cache.evict_all().is_ok());
        assert!(cache.evict_all().is_ok());
        assert_eq!(cache.get_all(), Err(CacheError::CacheEmpty));
    }

    #[test]
    fn test_cache_concurrent_access() {
        let capacity = 16;
        let cache = Arc::new(LruCache::new(capacity));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = format!("{}", (worker * 7 + i) % 40);
                        match i % 4 {
                            0 | 1 => cache.put(key, i, Duration::hours(1)).unwrap(),
                            2 => {
                                let _ = cache.get(&key);
                            }
                            _ => {
                                let _ = cache.evict(&key);
                            }
                        }
                        assert!(cache.len().unwrap() <= capacity);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker should not panic");
        }

        assert!(cache.len().unwrap() <= capacity);
        cache.store.lock().unwrap().assert_consistent();
    }

    #[test]
    fn test_cache_poisoned_lock_is_internal_error() {
        let cache = Arc::new(LruCache::<i32>::new(5));

        let poisoner = Arc::clone(&cache);
        let _ = thread::spawn(move || {
            let _guard = poisoner.store.lock().unwrap();
            panic!("poison the cache lock");
        })
        .join();

        assert!(matches!(
            cache.put("0", 0, Duration::hours(1)),
            Err(CacheError::Internal(_))
        ));
        assert!(matches!(cache.get("0"), Err(CacheError::Internal(_))));
    }
}
