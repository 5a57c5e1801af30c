//! Key Cache Module
//!
//! Main cache engine: a HashMap of keys by identifier, guarded by a max-age
//! freshness policy and a max-size capacity policy.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, KeyEntry, MaxAge, MaxSize};
use crate::error::{KeyCacheError, Result};
use crate::jwk::JsonWebKey;

/// A key cache shared between concurrent callers. One lock guards all map
/// access; lookups mutate too, so both operations need the write half.
pub type SharedKeyCache = Arc<RwLock<KeyCache>>;

// == Key Cacher ==
/// Lookup and refresh contract between a token-verification pipeline and
/// whatever holds its keys.
///
/// [`KeyCache`] is the in-memory implementation; callers that need another
/// store can plug in their own.
pub trait KeyCacher {
    /// Returns the key named `kid`, or fails with `NotFound` / `Expired`.
    fn get(&mut self, kid: &str) -> Result<JsonWebKey>;

    /// Offers a freshly downloaded batch and returns the key named `kid`.
    fn add(&mut self, kid: &str, downloaded_keys: &[JsonWebKey]) -> Result<JsonWebKey>;
}

// == Key Cache ==
/// In-memory cache of verification keys.
///
/// The cache does no locking of its own. Wrap it in a [`SharedKeyCache`]
/// to use it from more than one task.
#[derive(Debug)]
pub struct KeyCache {
    /// Entries by key identifier
    entries: HashMap<String, KeyEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Freshness policy
    max_age: MaxAge,
    /// Capacity policy
    max_size: MaxSize,
}

impl KeyCache {
    // == Constructor ==
    /// Creates an empty cache with the given policies.
    pub fn new(max_age: MaxAge, max_size: MaxSize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_age,
            max_size,
        }
    }

    /// Creates a cache whose entries never expire and whose size is unbounded.
    ///
    /// Every key of every downloaded batch is kept for the lifetime of the
    /// instance.
    pub fn persistent() -> Self {
        Self::new(MaxAge::NoCheck, MaxSize::Unlimited)
    }

    /// Moves the cache behind a lock for shared use.
    pub fn into_shared(self) -> SharedKeyCache {
        Arc::new(RwLock::new(self))
    }

    pub fn max_age(&self) -> MaxAge {
        self.max_age
    }

    pub fn max_size(&self) -> MaxSize {
        self.max_size
    }

    // == Get ==
    /// Looks up a key by identifier.
    ///
    /// An entry past its max age is removed and reported as
    /// [`KeyCacheError::Expired`]; the next lookup of the same identifier then
    /// fails with [`KeyCacheError::NotFound`].
    pub fn get(&mut self, kid: &str) -> Result<JsonWebKey> {
        let Some(entry) = self.entries.get(kid) else {
            self.stats.record_miss();
            return Err(KeyCacheError::NotFound(kid.to_string()));
        };

        if !entry.is_expired(self.max_age) {
            let key = entry.key.clone();
            self.stats.record_hit();
            return Ok(key);
        }

        let age = entry.age();
        self.entries.remove(kid);
        self.stats.record_miss();
        self.stats.record_expirations(1);
        self.stats.set_total_entries(self.entries.len());
        debug!(kid, age_ms = age.as_millis() as u64, "Dropped expired key");

        Err(KeyCacheError::Expired(kid.to_string()))
    }

    // == Add ==
    /// Stores keys from a freshly downloaded batch and returns the one named
    /// `kid`.
    ///
    /// The batch is walked once, in order. If several keys carry `kid`, the
    /// last one wins. What gets stored depends on the size policy, and the
    /// two cases are deliberately asymmetric:
    ///
    /// - [`MaxSize::Unlimited`]: every key in the batch is stored, whether or
    ///   not `kid` is among them. A miss still reports
    ///   [`KeyCacheError::NotFound`] but leaves the batch cached.
    /// - [`MaxSize::Bounded`]: only the matching key is stored, after which
    ///   the single oldest entry is evicted if the cache is over capacity.
    ///   With a bound of zero the key is returned but never retained.
    pub fn add(&mut self, kid: &str, downloaded_keys: &[JsonWebKey]) -> Result<JsonWebKey> {
        let mut matched = None;

        for key in downloaded_keys {
            if key.kid == kid {
                matched = Some(key);
            }
            if self.max_size.is_unlimited() {
                self.store(key.clone());
            }
        }

        let Some(key) = matched.cloned() else {
            debug!(kid, batch = downloaded_keys.len(), "Requested key missing from batch");
            return Err(KeyCacheError::NotFound(kid.to_string()));
        };

        if !self.max_size.is_unlimited() {
            self.store(key.clone());
            self.handle_overflow(kid);
        }

        Ok(key)
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        if self.max_age == MaxAge::NoCheck {
            return 0;
        }

        let now = Utc::now();
        let before = self.entries.len();
        let max_age = self.max_age;
        self.entries
            .retain(|_, entry| !max_age.is_expired(entry.added_at, now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Checks for an entry without applying the max-age policy.
    pub fn contains(&self, kid: &str) -> bool {
        self.entries.contains_key(kid)
    }

    /// Arrival time of an entry, without applying the max-age policy.
    pub fn added_at(&self, kid: &str) -> Option<DateTime<Utc>> {
        self.entries.get(kid).map(|entry| entry.added_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces the entry for `key.kid` with a fresh timestamp.
    fn store(&mut self, key: JsonWebKey) {
        debug!(kid = %key.kid, "Storing key");
        self.entries.insert(key.kid.clone(), KeyEntry::new(key));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Handle Overflow ==
    /// Evicts the single oldest entry if the cache is over capacity.
    ///
    /// Insertions in bounded mode add at most one entry, so one eviction is
    /// enough to restore the bound. Among entries with the same timestamp the
    /// one just inserted (`newest`) is evicted last.
    fn handle_overflow(&mut self, newest: &str) {
        if !self.max_size.is_exceeded_by(self.entries.len()) {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|(kid, entry)| (entry.added_at, kid.as_str() == newest))
            .map(|(kid, _)| kid.clone());

        if let Some(kid) = oldest {
            self.entries.remove(&kid);
            self.stats.record_eviction();
            self.stats.set_total_entries(self.entries.len());
            debug!(kid = %kid, "Evicted oldest key");
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_at(&mut self, key: JsonWebKey, added_at: DateTime<Utc>) {
        self.entries
            .insert(key.kid.clone(), KeyEntry::with_added_at(key, added_at));
    }
}

impl KeyCacher for KeyCache {
    fn get(&mut self, kid: &str) -> Result<JsonWebKey> {
        KeyCache::get(self, kid)
    }

    fn add(&mut self, kid: &str, downloaded_keys: &[JsonWebKey]) -> Result<JsonWebKey> {
        KeyCache::add(self, kid, downloaded_keys)
    }
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::persistent()
    }
}
