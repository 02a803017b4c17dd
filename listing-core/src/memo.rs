//! Keyed render memoization
//!
//! [`MemoCache`] remembers, per identity key, the props a render body was last
//! called with and what it produced. Rendering again with equal props returns
//! the stored output without calling the body; any difference re-runs it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Hit/miss counters for a [`MemoCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Renders answered from the cache.
    pub hits: u64,
    /// Renders that ran the body.
    pub misses: u64,
    /// Entries currently cached.
    pub entries: usize,
}

/// Cache of rendered output keyed by identity, validated by props equality.
#[derive(Debug)]
pub struct MemoCache<K, P, O> {
    entries: HashMap<K, (P, O)>,
    hits: u64,
    misses: u64,
}

impl<K, P, O> Default for MemoCache<K, P, O> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K, P, O> MemoCache<K, P, O>
where
    K: Eq + Hash,
    P: PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the output for `key`, running `body` only when `props` differ
    /// from the last props seen for that key.
    pub fn render<F>(&mut self, key: K, props: P, body: F) -> &O
    where
        F: FnOnce(&P) -> O,
    {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if entry.get().0 == props {
                    self.hits += 1;
                } else {
                    self.misses += 1;
                    let output = body(&props);
                    entry.insert((props, output));
                }
                &entry.into_mut().1
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let output = body(&props);
                &entry.insert((props, output)).1
            }
        }
    }

    /// Drop entries whose key fails `live`. Returns how many were evicted.
    pub fn retain<F>(&mut self, mut live: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, _| live(key));
        before - self.entries.len()
    }

    /// Forget one key.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
