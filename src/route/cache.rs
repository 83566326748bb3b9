use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::network::EdgeId;
use crate::route::InternalPath;

/// A generic read-through cache for a hashmap-backed data structure
#[derive(Debug)]
pub struct CacheMap<K, V>
where
    K: Hash + Eq + Copy + Debug,
    V: Debug,
{
    map: FxHashMap<K, Arc<V>>,
}

impl<K, V> Default for CacheMap<K, V>
where
    K: Hash + Eq + Copy + Debug,
    V: Debug,
{
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<K, V> CacheMap<K, V>
where
    K: Hash + Eq + Copy + Debug,
    V: Debug,
{
    /// Returns the cached value for `key`, calculating and storing it first if absent.
    pub fn query(&mut self, key: K, calculate: impl FnOnce() -> V) -> Arc<V> {
        if let Some(value) = self.map.get(&key) {
            return Arc::clone(value);
        }

        let calculated = Arc::new(calculate());
        self.map.insert(key, Arc::clone(&calculated));

        calculated
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Cheapest internal chains, keyed by the (from, to) transition they realise.
/// Lives for a single outer search.
pub type InternalPathCache = CacheMap<(EdgeId, EdgeId), Option<InternalPath>>;
