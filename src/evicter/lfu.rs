//! LFU Evicter Module
//!
//! Ranks keys by a cumulative score fed by promote/demote deltas.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;

use super::Evicter;

#[derive(Debug, Clone, Copy)]
struct Score {
    value: i64,
    /// First-promotion order, used to break ties.
    seq: u64,
}

#[derive(Debug)]
struct LfuState<K> {
    scores: HashMap<K, Score>,
    next_seq: u64,
}

impl<K> LfuState<K>
where
    K: Eq + Hash + Clone,
{
    fn adjust(&mut self, key: &K, delta: i64) {
        if let Some(score) = self.scores.get_mut(key) {
            score.value = score.value.saturating_add(delta);
            return;
        }

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.scores.insert(
            key.clone(),
            Score {
                value: delta,
                seq,
            },
        );
    }
}

// == LFU Evicter ==
/// Least-frequently-used ranking: the key with the lowest score is evicted first.
///
/// Scores start at zero and may go negative. Keys with equal scores are
/// ranked in the order they were first tracked.
#[derive(Debug)]
pub struct LfuEvicter<K> {
    state: Mutex<LfuState<K>>,
}

impl<K> LfuEvicter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LfuState {
                scores: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Returns the current score of `key`, if tracked.
    pub fn score(&self, key: &K) -> Option<i64> {
        self.state.lock().scores.get(key).map(|score| score.value)
    }

    pub fn len(&self) -> usize {
        self.state.lock().scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().scores.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().scores.contains_key(key)
    }
}

impl<K> Default for LfuEvicter<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Evicter<K> for LfuEvicter<K>
where
    K: Eq + Hash + Clone + Send,
{
    fn promote(&self, key: &K, delta: i64) {
        self.state.lock().adjust(key, delta);
    }

    fn demote(&self, key: &K, delta: i64) {
        self.state.lock().adjust(key, delta.saturating_neg());
    }

    fn evictees(&self, n: usize) -> Vec<K> {
        let state = self.state.lock();
        let mut ranked: Vec<(&K, Score)> = state
            .scores
            .iter()
            .map(|(key, score)| (key, *score))
            .collect();
        ranked.sort_unstable_by_key(|(_, score)| (score.value, score.seq));

        ranked
            .into_iter()
            .take(n)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn evict(&self, key: &K) {
        self.state.lock().scores.remove(key);
    }
}
