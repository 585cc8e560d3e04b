//! In-run memoization
//!
//! Lives for one run, never evicts, never persists. Failed computations are
//! not stored.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct Memo<K, V> {
    values: HashMap<K, V>,
    hits: usize,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            hits: 0,
        }
    }

    /// Return the stored value for `key`, computing and storing it on first use
    pub fn get_or_try_insert_with<E, F>(&mut self, key: &K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.values.get(key) {
            self.hits += 1;
            return Ok(value.clone());
        }

        let value = compute()?;
        self.values.insert(key.clone(), value.clone());
        Ok(value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Number of distinct keys computed
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of lookups answered from memory
    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
