//! Cache Entry Module
//!
//! Defines the data carried by every live key: the key itself, its opaque
//! value and the absolute instant at which it expires.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A single cache entry.
///
/// The value type is opaque to the cache; nothing ever inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Absolute expiration instant
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after `now`.
    ///
    /// A zero or negative `ttl` produces an entry that is already expired.
    /// Instants past the representable range saturate.
    pub fn new(key: String, value: V, ttl: Duration, now: DateTime<Utc>) -> Self {
        let expires_at = now.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });

        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` is at or past
    /// `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
