//! Stress test - many tasks
//!
//! Tests submitting and running large numbers of tasks on both pool
//! engines and reports throughput for each.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use threadpool::{DynamicPool, SteadyPool};

fn run_dynamic(num_tasks: usize) {
    println!("--- DynamicPool({num_tasks} tasks) ---");
    let pool = DynamicPool::with_workers(8);
    let completed = Arc::new(AtomicU64::new(0));

    let start = Instant::now();
    for _ in 0..num_tasks {
        let completed = Arc::clone(&completed);
        pool.spawn_void(move || {
            completed.fetch_add(1, Ordering::Relaxed);
        });
    }
    let spawn_time = start.elapsed();

    pool.wait_for_tasks();
    let total_time = start.elapsed();

    println!("Spawn time:  {spawn_time:?}");
    println!("Total time:  {total_time:?}");
    println!("Completed:   {}/{}", completed.load(Ordering::Relaxed), num_tasks);
    println!(
        "Throughput:  {:.0} tasks/sec\n",
        num_tasks as f64 / total_time.as_secs_f64()
    );
}

fn run_steady(num_tasks: usize) {
    println!("--- SteadyPool({num_tasks} tasks) ---");
    let pool = SteadyPool::with_workers(8);
    let completed = Arc::new(AtomicU64::new(0));

    let start = Instant::now();
    for _ in 0..num_tasks {
        let completed = Arc::clone(&completed);
        pool.spawn_void(move || {
            completed.fetch_add(1, Ordering::Relaxed);
        });
    }
    let spawn_time = start.elapsed();

    pool.wait_for_tasks();
    let total_time = start.elapsed();

    println!("Spawn time:  {spawn_time:?}");
    println!("Total time:  {total_time:?}");
    println!("Completed:   {}/{}", completed.load(Ordering::Relaxed), num_tasks);
    println!(
        "Throughput:  {:.0} tasks/sec\n",
        num_tasks as f64 / total_time.as_secs_f64()
    );
}

fn main() {
    println!("=== Thread Pool Stress Test ===\n");

    let num_tasks: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);

    run_dynamic(num_tasks);
    run_steady(num_tasks);

    println!("=== Stress Test Complete ===");
}
