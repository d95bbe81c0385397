//! Producer/consumer example
//!
//! Demonstrates a pool task producing values for another pool task to
//! consume over a standard library channel.

use std::sync::mpsc;

use threadpool::SteadyPool;

fn main() {
    println!("=== SteadyPool Producer/Consumer Example ===\n");

    let pool = SteadyPool::with_workers(4);
    let (tx, rx) = mpsc::channel::<i32>();

    println!("Submitting producer task...\n");
    let producer = pool.submit_task(move || {
        println!("[producer] starting");
        for i in 1..=5 {
            tx.send(i).expect("consumer dropped receiver");
            println!("[producer] sent: {i}");
        }
        println!("[producer] done");
    });

    println!("Submitting consumer task...\n");
    let consumer = pool.submit_task(move || {
        println!("[consumer] starting");
        let mut received = Vec::new();
        while let Ok(val) = rx.recv() {
            println!("[consumer] received: {val}");
            received.push(val);
        }
        println!("[consumer] channel closed, done");
        received
    });

    producer.get().expect("producer task panicked");
    let received = consumer.get().expect("consumer task panicked");

    println!("\nConsumer collected: {received:?}");
    println!("\n=== Example Complete ===");
}
