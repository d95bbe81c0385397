//! Head-to-head throughput comparison between DynamicPool and SteadyPool.
//!
//! Submits an increasing number of trivial tasks to each engine and times
//! submission-to-drain, the same `f(a,b) = cos(sin(a)) + sin(cos(b))`
//! workload used in the pool test suites, so the numbers here are
//! comparable to what the unit tests exercise at smaller scale.

use std::time::Instant;

use threadpool::{DynamicPool, SteadyPool};

fn workload(a: f64, b: f64) -> f64 {
    a.sin().cos() + b.cos().sin()
}

fn tic() -> Instant {
    Instant::now()
}

fn tok(label: &str, start: Instant, n: usize) {
    let elapsed = start.elapsed();
    println!(
        "{label:<28} {elapsed:>10.3?}  ({:.0} tasks/sec)",
        n as f64 / elapsed.as_secs_f64()
    );
}

fn bench_dynamic(num_tasks: usize, num_workers: usize) {
    let pool = DynamicPool::with_workers(num_workers);
    let start = tic();
    let handles = pool.submit_batch((0..num_tasks).map(|_| || workload(3.14, 2.71)));
    for h in handles {
        let _ = h.get();
    }
    tok(
        &format!("DynamicPool({num_workers}) x{num_tasks}"),
        start,
        num_tasks,
    );
}

fn bench_steady(num_tasks: usize, num_workers: usize) {
    let pool = SteadyPool::with_workers(num_workers);
    let start = tic();
    let handles = pool.submit_batch((0..num_tasks).map(|_| || workload(3.14, 2.71)));
    for h in handles {
        let _ = h.get();
    }
    tok(
        &format!("SteadyPool({num_workers}) x{num_tasks}"),
        start,
        num_tasks,
    );
}

fn main() {
    println!("=== DynamicPool vs SteadyPool Benchmark ===\n");

    let num_workers: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4));

    println!("workers = {num_workers}\n");

    for &num_tasks in &[10_000usize, 100_000, 1_000_000] {
        bench_dynamic(num_tasks, num_workers);
        bench_steady(num_tasks, num_workers);
        println!();
    }

    println!("=== Benchmark Complete ===");
}
