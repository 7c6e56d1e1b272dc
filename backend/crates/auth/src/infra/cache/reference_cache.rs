//! Copy-on-reload keyed cache
//!
//! Readers clone an `Arc` to the current map and release the lock at once.
//! A reload builds the new map off-lock and swaps it in, so readers see
//! either the old contents or the new ones, never a mix.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug)]
pub struct ReferenceCache<K, V> {
    entries: RwLock<Arc<HashMap<K, V>>>,
}

impl<K, V> Default for ReferenceCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Arc::new(HashMap::new())),
        }
    }
}

impl<K, V> ReferenceCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `entries` and publish in one swap
    pub fn replace_all(&self, entries: impl IntoIterator<Item = (K, V)>) {
        let fresh: HashMap<K, V> = entries.into_iter().collect();
        *self.entries.write() = Arc::new(fresh);
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.read().get(key).cloned()
    }

    /// Current contents; stays valid across later reloads
    pub fn snapshot(&self) -> Arc<HashMap<K, V>> {
        Arc::clone(&self.entries.read())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
