//! Cache Statistics Module
//!
//! Usage counters kept since the cache was created. Evict-all drops the
//! entries but leaves the counters running.

use serde::Serialize;

// == Cache Stats ==
/// Usage counters plus the entry count at the moment of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries found expired on access and removed
    pub expirations: u64,
    /// Indexed entries when the snapshot was taken, expired ones included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a single-key lookup.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Copy of the counters stamped with the current entry count.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..*self
        }
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}
