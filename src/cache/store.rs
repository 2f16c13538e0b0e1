//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list,
//! enforcing capacity on every insertion and expiring entries lazily.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Unsynchronized cache storage with LRU eviction and lazy TTL expiration.
///
/// Every key in `index` addresses exactly one linked node in `list`, and
/// every linked node is addressed by its key in `index`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to recency-list handle
    index: HashMap<String, usize>,
    /// Entries ordered least to most recently used
    list: RecencyList<V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be > 0");
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Put ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// An existing entry for `key` is discarded first. If the insertion
    /// pushes the cache over capacity, the least recently used entry is
    /// evicted.
    pub fn put(&mut self, key: String, value: V, ttl: Duration) {
        self.put_at(key, value, ttl, Utc::now());
    }

    pub(crate) fn put_at(&mut self, key: String, value: V, ttl: Duration, now: DateTime<Utc>) {
        if let Some(handle) = self.index.remove(&key) {
            self.list.remove(handle);
        }

        let entry = CacheEntry::new(key.clone(), value, ttl, now);
        let handle = self.list.push(entry);
        self.index.insert(key, handle);

        if self.index.len() > self.capacity {
            self.evict_oldest();
        }
    }

    // == Get ==
    /// Retrieves a value and its expiration instant.
    ///
    /// A hit moves the entry to most recently used. An expired entry is
    /// removed and reported as not found.
    pub fn get(&mut self, key: &str) -> Result<(V, DateTime<Utc>)>
    where
        V: Clone,
    {
        self.get_at(key, Utc::now())
    }

    pub(crate) fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Result<(V, DateTime<Utc>)>
    where
        V: Clone,
    {
        let handle = match self.live_handle(key, now) {
            Ok(handle) => handle,
            Err(err) => {
                self.stats.record_lookup(false);
                return Err(err);
            }
        };

        self.list.touch(handle);
        let entry = self
            .list
            .entry(handle)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        self.stats.record_lookup(true);
        Ok((entry.value.clone(), entry.expires_at))
    }

    // == Get All ==
    /// Returns every indexed key alongside its value, `keys[i]` pairing
    /// with `values[i]`.
    ///
    /// Entries that have expired but not yet been touched are included.
    pub fn get_all(&self) -> Result<(Vec<String>, Vec<V>)>
    where
        V: Clone,
    {
        if self.is_empty() {
            return Err(CacheError::CacheEmpty);
        }

        Ok(self
            .list
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .unzip())
    }

    // == Evict ==
    /// Removes `key` and returns its value.
    ///
    /// Reports `CacheEmpty` before looking at the key when nothing is stored.
    pub fn evict(&mut self, key: &str) -> Result<V> {
        self.evict_at(key, Utc::now())
    }

    pub(crate) fn evict_at(&mut self, key: &str, now: DateTime<Utc>) -> Result<V> {
        if self.is_empty() {
            return Err(CacheError::CacheEmpty);
        }

        let handle = self.live_handle(key, now)?;
        self.index.remove(key);
        let entry = self
            .list
            .remove(handle)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        Ok(entry.value)
    }

    // == Evict All ==
    /// Drops every entry. Succeeds on an already empty cache.
    pub fn evict_all(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.index.len())
    }

    /// Returns the current number of indexed entries, expired or not.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Resolves `key` to the handle of a live entry, removing it if it has
    /// expired.
    fn live_handle(&mut self, key: &str, now: DateTime<Utc>) -> Result<usize> {
        let handle = *self
            .index
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        let expired = self
            .list
            .entry(handle)
            .map_or(true, |entry| entry.is_expired_at(now));

        if expired {
            self.index.remove(key);
            self.list.remove(handle);
            self.stats.record_expiration();
            debug!(key, "removed expired entry on access");
            return Err(CacheError::NotFound(key.to_string()));
        }

        Ok(handle)
    }

    /// Removes the node adjacent to the head sentinel.
    fn evict_oldest(&mut self) {
        let Some(handle) = self.list.oldest() else {
            return;
        };
        if let Some(evicted) = self.list.remove(handle) {
            self.index.remove(&evicted.key);
            self.stats.record_eviction();
            debug!(key = %evicted.key, "evicted least recently used entry");
        }
    }

    /// Checks that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.list.len(), "index and list sizes differ");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for (key, &handle) in &self.index {
            let entry = self.list.entry(handle).expect("indexed handle must hold an entry");
            assert_eq!(&entry.key, key, "handle points at a different key");
        }
        for entry in self.list.iter() {
            assert!(self.index.contains_key(&entry.key), "linked node missing from index");
        }
    }

    /// Keys ordered least to most recently used.
    #[cfg(test)]
    pub(crate) fn recency_order(&self) -> Vec<String> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }
}
