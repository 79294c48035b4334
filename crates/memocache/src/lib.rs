//! # memocache
//!
//! Self-adjusting lookup structures for repeated queries over mutable data.
//!
//! ## Architecture
//! - **Recency list**: arena-backed doubly-linked list, MRU at head (O(1))
//! - **LRU cache**: AHash map from key to list handle plus the recency list
//! - **Range cache**: LRU of `(L, R)` range sums, invalidated by point updates
//! - **Splay tree**: arena BST that splays every hit and insert to the root
//! - **Memo evaluator**: recursive Fibonacci over an LRU or splay-tree store
//!
//! All structures are single-threaded; wrap them in a lock to share them.

#![warn(missing_docs)]

mod array;
mod error;
mod list;
mod lru;
mod memo;
mod range;
mod splay;
mod stats;

pub use array::{range_sum_no_cache, update_no_cache, RangeSumArray};
pub use error::{Error, Result};
pub use list::{Handle, RecencyList};
pub use lru::LruCache;
pub use memo::{Fibonacci, MemoStore, MAX_FIBONACCI_N};
pub use range::{RangeCache, RangeKey};
pub use splay::SplayTree;
pub use stats::{CacheStats, StatsSnapshot};
