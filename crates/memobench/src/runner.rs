//! Timed runs of each workload

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use memocache::{
    range_sum_no_cache, update_no_cache, Fibonacci, LruCache, MemoStore, RangeSumArray, SplayTree,
};
use tracing::{debug, info};

use crate::workload::{Query, Workload};

/// Parameters of the range-sum workload
#[derive(Debug, Clone)]
pub struct RangeConfig {
    pub len: usize,
    pub queries: usize,
    pub capacity: usize,
    pub update_ratio: f64,
    pub seed: u64,
}

/// Outcome of [`run_range`]
#[derive(Debug)]
pub struct RangeReport {
    pub no_cache: Duration,
    pub cached: Duration,
    pub hit_ratio: f64,
}

/// Replay one query stream against a plain array and a cached one
///
/// Every range answer from the cached run must match the plain run.
pub fn run_range(config: &RangeConfig) -> Result<RangeReport> {
    let mut workload = Workload::new(config.seed);
    let mut plain = workload.array(config.len);
    let queries = workload.queries(config.len, config.queries, config.update_ratio);
    let mut cached = RangeSumArray::new(plain.clone(), config.capacity)?;

    let start = Instant::now();
    let mut expected = Vec::with_capacity(queries.len());
    for query in &queries {
        match *query {
            Query::Range { left, right } => {
                expected.push(range_sum_no_cache(&plain, left, right)?);
            }
            Query::Update { index, value } => update_no_cache(&mut plain, index, value)?,
        }
    }
    let no_cache = start.elapsed();

    let start = Instant::now();
    let mut answers = Vec::with_capacity(expected.len());
    for query in &queries {
        match *query {
            Query::Range { left, right } => answers.push(cached.range_sum(left, right)?),
            Query::Update { index, value } => cached.update(index, value)?,
        }
    }
    let cached_time = start.elapsed();

    ensure!(answers == expected, "cached range sums diverged from uncached baseline");

    let stats = cached.cache().stats().snapshot();
    debug!(?stats, "range cache counters");

    Ok(RangeReport {
        no_cache,
        cached: cached_time,
        hit_ratio: cached.cache().stats().hit_ratio(),
    })
}

/// Parameters of the Fibonacci workload
#[derive(Debug, Clone)]
pub struct FibConfig {
    pub max_n: u64,
    pub step: usize,
    pub repeats: u32,
    pub lru_capacity: usize,
}

/// Mean time per `n` for each store
#[derive(Debug)]
pub struct FibSample {
    pub n: u64,
    pub lru: Duration,
    pub splay: Duration,
}

fn mean_time<S: MemoStore>(fib: &mut Fibonacci<S>, n: u64, repeats: u32) -> Result<Duration> {
    let mut total = Duration::ZERO;
    for _ in 0..repeats {
        fib.clear();
        let start = Instant::now();
        fib.compute(n)?;
        total += start.elapsed();
    }
    Ok(total / repeats)
}

/// Time `F(n)` with an LRU store and a splay-tree store for each `n`
///
/// Each repeat starts from an empty store.
pub fn run_fibonacci(config: &FibConfig) -> Result<Vec<FibSample>> {
    ensure!(config.step > 0, "step must be positive");
    ensure!(config.repeats > 0, "repeats must be positive");
    ensure!(config.lru_capacity > 0, "LRU capacity must be positive");

    let mut lru = Fibonacci::new(LruCache::<u64, u128>::new(config.lru_capacity));
    let mut splay = Fibonacci::new(SplayTree::<u64, u128>::new());

    let mut samples = Vec::new();
    for n in (0..=config.max_n).step_by(config.step) {
        let sample = FibSample {
            n,
            lru: mean_time(&mut lru, n, config.repeats)?,
            splay: mean_time(&mut splay, n, config.repeats)?,
        };
        info!(n, lru = ?sample.lru, splay = ?sample.splay, "fibonacci timing");
        samples.push(sample);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_range_small() {
        let report = run_range(&RangeConfig {
            len: 50,
            queries: 2_000,
            capacity: 16,
            update_ratio: 0.3,
            seed: 42,
        })
        .unwrap();

        assert!((0.0..=1.0).contains(&report.hit_ratio));
    }

    #[test]
    fn test_run_range_rejects_zero_capacity() {
        let result = run_range(&RangeConfig {
            len: 10,
            queries: 10,
            capacity: 0,
            update_ratio: 0.3,
            seed: 1,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_run_fibonacci_samples() {
        let samples = run_fibonacci(&FibConfig {
            max_n: 40,
            step: 10,
            repeats: 2,
            lru_capacity: 64,
        })
        .unwrap();

        let ns: Vec<u64> = samples.iter().map(|s| s.n).collect();
        assert_eq!(ns, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_run_fibonacci_rejects_zero_capacity() {
        let result = run_fibonacci(&FibConfig {
            max_n: 10,
            step: 5,
            repeats: 1,
            lru_capacity: 0,
        });

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "LRU capacity must be positive");
    }

    #[test]
    fn test_run_fibonacci_overflow() {
        let result = run_fibonacci(&FibConfig {
            max_n: 200,
            step: 200,
            repeats: 1,
            lru_capacity: 256,
        });

        // n = 0 succeeds, n = 200 overflows
        assert!(result.is_err());
    }
}
