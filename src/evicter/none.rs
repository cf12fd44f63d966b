//! No-op evicter used when no policy is injected.

use std::marker::PhantomData;

use super::Evicter;

/// Tracks nothing and never proposes evictees.
#[derive(Debug)]
pub struct NoEvicter<K> {
    _keys: PhantomData<fn(&K)>,
}

impl<K> NoEvicter<K> {
    pub fn new() -> Self {
        Self { _keys: PhantomData }
    }
}

impl<K> Default for NoEvicter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Evicter<K> for NoEvicter<K> {
    fn promote(&self, _key: &K, _delta: i64) {}

    fn demote(&self, _key: &K, _delta: i64) {}

    fn evictees(&self, _n: usize) -> Vec<K> {
        Vec::new()
    }

    fn evict(&self, _key: &K) {}
}
