//! LRU Evicter Module
//!
//! Ranks keys by the wall-clock time they were last promoted.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::Evicter;

// == Touch ==
/// Last access recorded for a key.
///
/// `seq` orders touches that share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Touch {
    at: DateTime<Utc>,
    seq: u64,
}

#[derive(Debug)]
struct LruState<K> {
    touches: HashMap<K, Touch>,
    next_seq: u64,
}

// == LRU Evicter ==
/// Least-recently-used ranking: the key touched longest ago is evicted first.
#[derive(Debug)]
pub struct LruEvicter<K> {
    state: Mutex<LruState<K>>,
}

impl<K> LruEvicter<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LruState {
                touches: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.state.lock().touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().touches.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().touches.contains_key(key)
    }

    /// Returns when `key` was last promoted, if tracked.
    pub fn last_touched(&self, key: &K) -> Option<DateTime<Utc>> {
        self.state.lock().touches.get(key).map(|touch| touch.at)
    }
}

impl<K> Default for LruEvicter<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Evicter<K> for LruEvicter<K>
where
    K: Eq + Hash + Clone + Send,
{
    /// Marks `key` as used now. The delta carries no meaning for recency.
    fn promote(&self, key: &K, _delta: i64) {
        let mut state = self.state.lock();
        let touch = Touch {
            at: Utc::now(),
            seq: state.next_seq,
        };
        state.next_seq = state.next_seq.wrapping_add(1);
        state.touches.insert(key.clone(), touch);
    }

    /// Recency has no reference point to lower from, so this does nothing.
    fn demote(&self, _key: &K, _delta: i64) {}

    fn evictees(&self, n: usize) -> Vec<K> {
        let state = self.state.lock();
        let mut ranked: Vec<(&K, Touch)> = state
            .touches
            .iter()
            .map(|(key, touch)| (key, *touch))
            .collect();
        ranked.sort_unstable_by_key(|(_, touch)| *touch);

        ranked
            .into_iter()
            .take(n)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn evict(&self, key: &K) {
        self.state.lock().touches.remove(key);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lru_new() {
        let lru = LruEvicter::<String>::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert!(lru.evictees(3).is_empty());
    }

    #[test]
    fn test_lru_oldest_first() {
        let lru = LruEvicter::new();

        lru.promote(&"key1".to_string(), 0);
        lru.promote(&"key2".to_string(), 0);
        lru.promote(&"key3".to_string(), 0);

        assert_eq!(lru.evictees(1), keys(&["key1"]));

        // Touch key1 again - key2 becomes the oldest
        lru.promote(&"key1".to_string(), 0);

        assert_eq!(lru.evictees(1), keys(&["key2"]));
        assert_eq!(lru.evictees(2), keys(&["key2", "key3"]));
        assert_eq!(lru.evictees(3), keys(&["key2", "key3", "key1"]));
    }

    #[test]
    fn test_lru_evictees_clamped() {
        let lru = LruEvicter::new();
        lru.promote(&"a".to_string(), 1);
        lru.promote(&"b".to_string(), 1);

        assert_eq!(lru.evictees(10), keys(&["a", "b"]));
        assert!(lru.evictees(0).is_empty());
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let lru = LruEvicter::new();

        for key in ["a", "b", "c", "a", "c", "b"] {
            lru.promote(&key.to_string(), 1);
        }

        assert_eq!(lru.evictees(3), keys(&["a", "c", "b"]));
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let lru = LruEvicter::new();

        lru.promote(&"key1".to_string(), 1);
        lru.promote(&"key1".to_string(), 1);
        lru.promote(&"key1".to_string(), 1);

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evictees(5), keys(&["key1"]));
    }

    #[test]
    fn test_lru_demote_is_noop() {
        let lru = LruEvicter::new();
        lru.promote(&"a".to_string(), 1);
        lru.promote(&"b".to_string(), 1);
        let before = lru.last_touched(&"b".to_string());

        lru.demote(&"b".to_string(), 100);
        lru.demote(&"unknown".to_string(), 1);

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"unknown".to_string()));
        assert_eq!(lru.last_touched(&"b".to_string()), before);
        assert_eq!(lru.evictees(2), keys(&["a", "b"]));
    }

    #[test]
    fn test_lru_evict() {
        let lru = LruEvicter::new();

        lru.promote(&"key1".to_string(), 1);
        lru.promote(&"key2".to_string(), 1);
        lru.promote(&"key3".to_string(), 1);

        lru.evict(&"key1".to_string());

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&"key1".to_string()));
        assert_eq!(lru.evictees(3), keys(&["key2", "key3"]));

        // Forgetting an unknown key is a no-op
        lru.evict(&"nonexistent".to_string());
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_promote_after_evict_is_newest() {
        let lru = LruEvicter::new();

        lru.promote(&"a".to_string(), 1);
        lru.promote(&"b".to_string(), 1);
        lru.evict(&"a".to_string());
        lru.promote(&"a".to_string(), 1);

        assert_eq!(lru.evictees(2), keys(&["b", "a"]));
    }

    #[test]
    fn test_lru_records_touch_time() {
        let lru = LruEvicter::new();
        let before = Utc::now();
        lru.promote(&7u64, 1);
        let after = Utc::now();

        let touched = lru.last_touched(&7).unwrap();
        assert!(touched >= before && touched <= after);
        assert!(lru.last_touched(&8).is_none());
    }
}
