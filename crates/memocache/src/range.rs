//! RangeCache: LRU cache of range sums keyed by `(L, R)`
//!
//! A point update at index `i` can change the sum of every range spanning
//! `i`, so [`RangeCache::invalidate_range_containing_index`] drops all of them
//! eagerly. There is no interval index; invalidation scans every entry.

use std::fmt;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Inclusive index range `[left, right]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    /// First index in the range
    pub left: usize,
    /// Last index in the range
    pub right: usize,
}

impl RangeKey {
    /// Create a key for `[left, right]`
    ///
    /// # Panics
    /// If `left > right`. A reversed key contains no index, so no update
    /// could ever invalidate it.
    pub fn new(left: usize, right: usize) -> Self {
        assert!(left <= right, "range key [{}, {}] is reversed", left, right);
        Self { left, right }
    }

    /// True when `left <= index <= right`
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

impl From<(usize, usize)> for RangeKey {
    fn from((left, right): (usize, usize)) -> Self {
        Self::new(left, right)
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

/// Fixed-capacity LRU cache of range sums with overlap invalidation
pub struct RangeCache {
    /// Recency-ordered entries
    cache: LruCache<RangeKey, i64>,

    /// Cache statistics
    stats: CacheStats,
}

impl RangeCache {
    /// Create a new RangeCache holding at most `capacity` ranges
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::new(),
        })
    }

    /// Look up a cached sum, marking the range most-recently-used
    pub fn get(&mut self, key: RangeKey) -> Option<i64> {
        match self.cache.get(&key) {
            Some(&sum) => {
                self.stats.record_hit();
                Some(sum)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Store a sum; evicts the least-recently-used range when full
    pub fn put(&mut self, key: RangeKey, sum: i64) {
        assert!(key.left <= key.right, "range key {} is reversed", key);
        if let Some((evicted, _)) = self.cache.put(key, sum) {
            trace!(range = %evicted, "evicted range");
            self.stats.record_eviction();
        }
        self.stats.record_insert();
    }

    /// Drop every cached range that spans `index`
    ///
    /// # Returns
    /// * Number of ranges removed
    pub fn invalidate_range_containing_index(&mut self, index: usize) -> usize {
        let removed = self.cache.retain(|key, _| !key.contains(index));
        if removed > 0 {
            debug!(index, removed, "invalidated cached ranges");
        }
        self.stats.record_invalidations(removed as u64);
        removed
    }

    /// Check whether a range is cached (does not touch recency order)
    pub fn contains(&self, key: RangeKey) -> bool {
        self.cache.contains(&key)
    }

    /// Cached ranges from most- to least-recently-used
    pub fn keys(&self) -> impl Iterator<Item = RangeKey> + '_ {
        self.cache.keys().copied()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Clear the cache and its statistics
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.reset();
    }
}
