//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with lazy TTL expiration and
//! an injected eviction ranking policy.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::cache::{CacheStats, Cacher, Entry, EntryOptions};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::evicter::{Evicter, NoEvicter};

/// Signal fed to the evicter on every write and successful read.
const ACCESS_SIGNAL: i64 = 1;

// == Cache ==
/// Concurrent key/value cache with lazy expiry.
///
/// Stale entries are only discovered and dropped by [`get`](Self::get) or an
/// explicit [`purge_expired`](Self::purge_expired); nothing sweeps in the
/// background. [`has`](Self::has) deliberately skips the expiry check.
///
/// The map sits behind a read/write lock. Evicter calls are made while that
/// lock is held (shared for lookups, exclusive for writes), and the evicter
/// synchronizes its own state, so a concurrent `del` can never be undone by a
/// late promote.
pub struct Cache<K, V> {
    /// Key-value storage
    entries: RwLock<HashMap<K, Entry<K, V>>>,
    /// Eviction ranking policy
    evicter: Arc<dyn Evicter<K>>,
    /// TTL applied to every entry in addition to its own options
    default_ttl: Option<Duration>,
    /// Performance statistics
    stats: Mutex<CacheStats>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with no default TTL and no eviction tracking.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a cache with explicit settings.
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    /// Creates a cache from configuration, building the configured evicter.
    pub fn from_config(config: &CacheConfig) -> Self {
        debug!(policy = %config.eviction_policy, "building cache from config");
        let mut builder = Self::builder().shared_evicter(config.eviction_policy.build());
        if let Some(ttl) = config.default_ttl {
            builder = builder.default_ttl(ttl);
        }
        builder.build()
    }

    // == Set ==
    /// Stores a key-value pair with the given per-entry options.
    ///
    /// Any existing entry for `key` is replaced wholesale, options included.
    /// Never fails for the in-memory store.
    pub fn set(&self, key: K, value: V, options: EntryOptions) -> Result<()> {
        let mut entries = self.entries.write();
        self.evicter.promote(&key, ACCESS_SIGNAL);
        entries.insert(key.clone(), Entry::new(key, value, options));
        Ok(())
    }

    // == Has ==
    /// Returns whether `key` is stored, without checking expiry.
    ///
    /// A stale entry that has not been read yet still reports present.
    /// Present keys are promoted in the evicter.
    pub fn has(&self, key: &K) -> bool {
        let entries = self.entries.read();
        let present = entries.contains_key(key);
        if present {
            self.evicter.promote(key, ACCESS_SIGNAL);
        }
        present
    }

    // == Delete ==
    /// Removes an entry by key and forgets it in the evicter.
    ///
    /// Deleting an absent key is a no-op.
    pub fn del(&self, key: &K) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            trace!("deleted cache entry");
        }
        self.evicter.evict(key);
        Ok(())
    }

    // == Purge Expired ==
    /// Removes every stale entry and returns how many were dropped.
    ///
    /// This only runs when called; the cache never sweeps on its own.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write();

        let stale: Vec<K> = entries
            .iter()
            .filter(|(_, entry)| self.is_stale(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.remove(key);
            self.evicter.evict(key);
        }

        let removed = stale.len();
        self.stats.lock().record_expirations(removed as u64);
        debug!(removed, remaining = entries.len(), "purged expired entries");
        removed
    }

    // == Eviction Ranking ==
    /// Returns up to `n` keys the evicter ranks as least worth keeping.
    ///
    /// Nothing is removed; pair with [`del`](Self::del) to actually evict.
    pub fn evictees(&self, n: usize) -> Vec<K> {
        self.evicter.evictees(n)
    }

    /// Lowers the rank of a stored key. Absent keys are ignored.
    pub fn demote(&self, key: &K, delta: i64) {
        let entries = self.entries.read();
        if entries.contains_key(key) {
            self.evicter.demote(key, delta);
        }
    }

    /// Returns the shared evicter handle.
    pub fn evicter(&self) -> &Arc<dyn Evicter<K>> {
        &self.evicter
    }

    /// Returns the cache-wide default TTL, if any.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().len();
        let mut stats = self.stats.lock().clone();
        stats.total_entries = total_entries;
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn is_stale(&self, entry: &Entry<K, V>, now: DateTime<Utc>) -> bool {
        entry.is_outdated_at(now)
            || self
                .default_ttl
                .is_some_and(|ttl| entry.is_older_than_at(ttl, now))
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone,
{
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `Ok(None)` if the key is absent or stale. A stale entry is
    /// removed from the map and forgotten by the evicter. Fresh hits are
    /// promoted.
    pub fn get(&self, key: &K) -> Result<Option<V>> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => {
                    self.stats.lock().record_miss();
                    return Ok(None);
                }
                Some(entry) if !self.is_stale(entry, Utc::now()) => {
                    let value = entry.value.clone();
                    self.evicter.promote(key, ACCESS_SIGNAL);
                    self.stats.lock().record_hit();
                    return Ok(Some(value));
                }
                Some(_) => {}
            }
        }

        // Re-check under the write lock: the entry may have been replaced
        // or deleted since the read lock was released.
        let mut entries = self.entries.write();
        let now = Utc::now();
        let fresh = match entries.get(key).map(|entry| self.is_stale(entry, now)) {
            Some(false) => entries.get(key).map(|entry| entry.value.clone()),
            Some(true) => {
                entries.remove(key);
                self.evicter.evict(key);
                self.stats.lock().record_expirations(1);
                trace!("removed stale entry on lookup");
                None
            }
            None => None,
        };

        let mut stats = self.stats.lock();
        match fresh {
            Some(value) => {
                self.evicter.promote(key, ACCESS_SIGNAL);
                stats.record_hit();
                Ok(Some(value))
            }
            None => {
                stats.record_miss();
                Ok(None)
            }
        }
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("entries", &self.entries.read().len())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl<K, V> Cacher<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone,
{
    fn set(&self, key: K, value: V, options: EntryOptions) -> Result<()> {
        Cache::set(self, key, value, options)
    }

    fn get(&self, key: &K) -> Result<Option<V>> {
        Cache::get(self, key)
    }

    fn has(&self, key: &K) -> bool {
        Cache::has(self, key)
    }

    fn del(&self, key: &K) -> Result<()> {
        Cache::del(self, key)
    }
}

// == Cache Builder ==
/// Named construction options for [`Cache`].
pub struct CacheBuilder<K, V> {
    evicter: Option<Arc<dyn Evicter<K>>>,
    default_ttl: Option<Duration>,
    _values: PhantomData<fn() -> V>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            evicter: None,
            default_ttl: None,
            _values: PhantomData,
        }
    }

    /// Uses `evicter` as the eviction policy, owned by the cache.
    pub fn evicter<E>(self, evicter: E) -> Self
    where
        E: Evicter<K> + 'static,
    {
        self.shared_evicter(Arc::new(evicter))
    }

    /// Uses a shared evicter, so the caller can keep its own handle.
    pub fn shared_evicter(mut self, evicter: Arc<dyn Evicter<K>>) -> Self {
        self.evicter = Some(evicter);
        self
    }

    /// Sets a TTL applied to every entry on top of its own options.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Builds the cache; without an evicter, [`NoEvicter`] is used.
    pub fn build(self) -> Cache<K, V> {
        debug!(default_ttl = ?self.default_ttl, "cache created");
        Cache {
            entries: RwLock::new(HashMap::new()),
            evicter: self
                .evicter
                .unwrap_or_else(|| Arc::new(NoEvicter::new())),
            default_ttl: self.default_ttl,
            stats: Mutex::new(CacheStats::new()),
        }
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
