//! memobench - replay workloads against memocache structures

mod runner;
mod workload;

use anyhow::Result;
use clap::{Parser, Subcommand};
use memocache::MAX_FIBONACCI_N;
use tracing::{info, warn};

use crate::runner::{run_fibonacci, run_range, FibConfig, RangeConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Range-sum queries with and without the LRU range cache
    Range {
        /// Array length
        #[arg(short = 'n', long, default_value_t = 100_000)]
        len: usize,

        /// Number of queries
        #[arg(short, long, default_value_t = 50_000)]
        queries: usize,

        /// Cache capacity (number of ranges)
        #[arg(short, long, default_value_t = 1000)]
        capacity: usize,

        /// Fraction of queries that are point updates
        #[arg(short, long, default_value_t = 0.3)]
        update_ratio: f64,

        /// RNG seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },

    /// Memoized Fibonacci with an LRU store versus a splay tree store
    Fib {
        /// Largest n to evaluate. Values are u128, so n is capped at 186
        /// (F(187) overflows) and larger requests are clamped
        #[arg(short = 'n', long, default_value_t = 180)]
        max_n: u64,

        /// Distance between successive n
        #[arg(short, long, default_value_t = 10)]
        step: usize,

        /// Runs averaged per n
        #[arg(short, long, default_value_t = 5)]
        repeats: u32,

        /// LRU store capacity
        #[arg(short, long, default_value_t = 256)]
        capacity: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Range {
            len,
            queries,
            capacity,
            update_ratio,
            seed,
        } => {
            anyhow::ensure!(len > 0, "array length must be positive");
            anyhow::ensure!(
                (0.0..=1.0).contains(&update_ratio),
                "update ratio must be within [0, 1]"
            );
            info!(len, queries, capacity, update_ratio, seed, "running range workload");

            let report = run_range(&RangeConfig {
                len,
                queries,
                capacity,
                update_ratio,
                seed,
            })?;

            info!(no_cache = ?report.no_cache, "uncached run finished");
            info!(
                cached = ?report.cached,
                hit_ratio = report.hit_ratio,
                "cached run finished"
            );
        }
        Command::Fib {
            mut max_n,
            step,
            repeats,
            capacity,
        } => {
            if max_n > MAX_FIBONACCI_N {
                warn!(requested = max_n, max = MAX_FIBONACCI_N, "clamping n to u128 range");
                max_n = MAX_FIBONACCI_N;
            }
            info!(max_n, step, repeats, capacity, "running fibonacci workload");

            let samples = run_fibonacci(&FibConfig {
                max_n,
                step,
                repeats,
                lru_capacity: capacity,
            })?;
            info!(points = samples.len(), "fibonacci workload finished");
        }
    }

    Ok(())
}
