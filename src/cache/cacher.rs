//! Cacher Trait
//!
//! The public key/value contract, shared by the in-memory store and any
//! other backend.

use crate::cache::EntryOptions;
use crate::error::Result;

/// Key/value store with lazy expiry.
///
/// `get` applies expiry checks and removes stale entries; `has` is a plain
/// existence probe that ignores staleness. Both count as an access for the
/// eviction policy.
pub trait Cacher<K, V> {
    /// Stores `value` under `key`, replacing any previous entry and its options.
    fn set(&self, key: K, value: V, options: EntryOptions) -> Result<()>;

    /// Returns the value if present and fresh.
    fn get(&self, key: &K) -> Result<Option<V>>;

    /// Returns whether `key` is present, stale or not.
    fn has(&self, key: &K) -> bool;

    /// Removes `key`. Deleting an absent key succeeds.
    fn del(&self, key: &K) -> Result<()>;
}
