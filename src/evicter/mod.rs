//! Evicter Module
//!
//! Pluggable policies that rank cached keys as eviction candidates.
//! An evicter never removes anything itself; the caller decides what to do
//! with the keys returned by [`Evicter::evictees`].

mod lfu;
mod lru;
mod none;

pub use lfu::LfuEvicter;
pub use lru::LruEvicter;
pub use none::NoEvicter;

// == Evicter Trait ==
/// Access-tracking strategy consulted by the cache.
///
/// Implementations synchronize their own state, so every method takes
/// `&self` and may be called concurrently from cache readers.
/// None of the methods may panic, whatever the input.
pub trait Evicter<K>: Send + Sync {
    /// Records a positive access signal for `key`, tracking it if unknown.
    fn promote(&self, key: &K, delta: i64);

    /// Records a negative signal for `key` without forgetting it.
    fn demote(&self, key: &K, delta: i64);

    /// Returns up to `n` tracked keys, the one to remove first at the front.
    fn evictees(&self, n: usize) -> Vec<K>;

    /// Forgets everything tracked about `key`. Unknown keys are ignored.
    fn evict(&self, key: &K);
}
