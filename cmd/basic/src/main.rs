//! Basic DynamicPool example
//!
//! Demonstrates submitting tasks and collecting their results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use threadpool::{DynamicPool, DynamicPoolConfig};

fn main() {
    println!("=== DynamicPool Basic Example ===\n");

    let config = DynamicPoolConfig::from_env().num_workers(4).debug_logging(true);
    let pool = DynamicPool::with_config(config);

    let completed = Arc::new(AtomicUsize::new(0));
    let total_tasks = 3;

    println!("Submitting tasks...\n");

    let c1 = Arc::clone(&completed);
    let h1 = pool.submit_task(move || {
        println!("[task 1] started");
        for i in 0..3 {
            println!("[task 1] iteration {i}");
        }
        println!("[task 1] finished");
        c1.fetch_add(1, Ordering::SeqCst);
        1
    });

    let c2 = Arc::clone(&completed);
    let h2 = pool.submit_task(move || {
        println!("[task 2] started");
        for i in 0..3 {
            println!("[task 2] iteration {i}");
        }
        println!("[task 2] finished");
        c2.fetch_add(1, Ordering::SeqCst);
        2
    });

    let c3 = Arc::clone(&completed);
    let h3 = pool.submit_task(move || {
        println!("[task 3] started");
        println!("[task 3] finished");
        c3.fetch_add(1, Ordering::SeqCst);
        3
    });

    println!("\nWaiting for results...");
    println!("task 1 -> {}", h1.get().unwrap());
    println!("task 2 -> {}", h2.get().unwrap());
    println!("task 3 -> {}", h3.get().unwrap());

    println!(
        "\n{}/{} tasks completed!",
        completed.load(Ordering::SeqCst),
        total_tasks
    );

    println!("\n=== Example Complete ===");
}
