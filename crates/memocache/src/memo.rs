//! Memoized recursive evaluation backed by an explicit store
//!
//! The evaluator owns its store instead of sharing a process-wide table, so
//! each run starts from a known state and [`Fibonacci::clear`] resets it.

use tracing::debug;

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::splay::SplayTree;
use crate::stats::CacheStats;

/// Key-value store a memoized evaluator consults before and after computing
pub trait MemoStore {
    /// Previously recorded result for `n`
    fn lookup(&mut self, n: u64) -> Option<u128>;

    /// Record the result for `n`
    fn record(&mut self, n: u64, value: u128);

    /// Forget every recorded result
    fn clear(&mut self);

    /// Number of recorded results
    fn len(&self) -> usize;

    /// Check if nothing is recorded
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemoStore for LruCache<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.get(&n).copied()
    }

    fn record(&mut self, n: u64, value: u128) {
        self.put(n, value);
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}

impl MemoStore for SplayTree<u64, u128> {
    fn lookup(&mut self, n: u64) -> Option<u128> {
        self.find(&n).copied()
    }

    fn record(&mut self, n: u64, value: u128) {
        self.insert(n, value);
    }

    fn clear(&mut self) {
        SplayTree::clear(self);
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }
}

/// Largest `n` whose Fibonacci number fits in a `u128`
pub const MAX_FIBONACCI_N: u64 = 186;

/// Fibonacci evaluator memoizing through a [`MemoStore`]
///
/// Each call consults the store first and records its result afterwards,
/// including the base cases `F(0) = 0` and `F(1) = 1`. A bounded store (an
/// [`LruCache`] smaller than `n + 1`) stays correct but recomputes evicted
/// values.
pub struct Fibonacci<S> {
    store: S,
    stats: CacheStats,
}

impl<S: MemoStore> Fibonacci<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: CacheStats::new(),
        }
    }

    /// Compute `F(n)`
    ///
    /// # Returns
    /// * `Err(Error::Overflow)` if `n` exceeds [`MAX_FIBONACCI_N`]
    pub fn compute(&mut self, n: u64) -> Result<u128> {
        if n > MAX_FIBONACCI_N {
            return Err(Error::Overflow(n));
        }
        Ok(self.eval(n))
    }

    fn eval(&mut self, n: u64) -> u128 {
        if let Some(value) = self.store.lookup(n) {
            self.stats.record_hit();
            return value;
        }
        self.stats.record_miss();

        let value = if n < 2 {
            n as u128
        } else {
            self.eval(n - 1) + self.eval(n - 2)
        };

        self.store.record(n, value);
        self.stats.record_insert();
        value
    }

    /// Drop every memoized value and reset statistics
    pub fn clear(&mut self) {
        debug!(entries = self.store.len(), "clearing memo store");
        self.store.clear();
        self.stats.reset();
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lookup statistics since construction or the last clear
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Take back the store
    pub fn into_store(self) -> S {
        self.store
    }
}
