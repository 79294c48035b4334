//! LRU (Least Recently Used) cache implementation
//!
//! Pairs an AHash map from key to list handle with a [`RecencyList`] for O(1)
//! eviction.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::list::{Handle, RecencyList};

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, Handle, RandomState>,
    list: RecencyList<K, V>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Panics
    /// If `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Get a value from the cache, marking it most-recently-used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = *self.map.get(key)?;
        self.list.move_to_front(handle);
        Some(self.list.get(handle).1)
    }

    /// Get a value without touching recency order
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|&handle| self.list.get(handle).1)
    }

    /// Insert a key-value pair into the cache
    ///
    /// Returns the evicted least-recently-used entry when a new key arrives
    /// at a full cache.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&handle) = self.map.get(&key) {
            *self.list.get_mut(handle) = value;
            self.list.move_to_front(handle);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let handle = self.list.push_front(key.clone(), value);
        self.map.insert(key, handle);

        evicted
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.map.remove(key)?;
        Some(self.list.remove(handle).1)
    }

    /// Keep only the entries for which `keep` returns true
    ///
    /// Scans every entry. Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<K> = self
            .list
            .iter()
            .filter(|&(k, v)| !keep(k, v))
            .map(|(k, _)| k.clone())
            .collect();

        for key in &doomed {
            if let Some(handle) = self.map.remove(key) {
                self.list.remove(handle);
            }
        }

        doomed.len()
    }

    /// Check whether a key is cached (does not touch recency order)
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Keys from most- to least-recently-used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(k, _)| k)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        Some((key, value))
    }
}
