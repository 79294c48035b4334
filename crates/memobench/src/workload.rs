//! Random query generation for the range-sum workload

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One step of the range-sum workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of `[left, right]`
    Range { left: usize, right: usize },
    /// Set `array[index] = value`
    Update { index: usize, value: i64 },
}

/// Seeded generator for arrays and query streams
pub struct Workload {
    rng: StdRng,
}

impl Workload {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `len` values drawn from `1..=100`
    pub fn array(&mut self, len: usize) -> Vec<i64> {
        (0..len).map(|_| self.rng.gen_range(1..=100)).collect()
    }

    /// `count` queries over an array of `len` elements
    ///
    /// Each query is an update with probability `update_ratio`, otherwise a
    /// range with `left` uniform in `[0, len)` and `right` uniform in
    /// `[left, len)`.
    pub fn queries(&mut self, len: usize, count: usize, update_ratio: f64) -> Vec<Query> {
        assert!(len > 0, "array must not be empty");

        (0..count)
            .map(|_| {
                if self.rng.gen_bool(update_ratio) {
                    Query::Update {
                        index: self.rng.gen_range(0..len),
                        value: self.rng.gen_range(1..=100),
                    }
                } else {
                    let left = self.rng.gen_range(0..len);
                    let right = self.rng.gen_range(left..len);
                    Query::Range { left, right }
                }
            })
            .collect()
    }
}
