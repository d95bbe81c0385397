//! End-to-end scenarios exercising both pool engines together.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use threadpool::{DynamicPool, SteadyPool};

fn reference(a: f64, b: f64) -> f64 {
    a.sin().cos() + b.cos().sin()
}

#[test]
fn many_trivial_tasks_dynamic() {
    let pool = DynamicPool::with_workers(4);
    let expected = reference(3.14, 2.71);

    let handles = pool.submit_batch((0..100_000).map(|_| move || reference(3.14, 2.71)));
    pool.wait_for_tasks();

    for h in handles {
        assert!(h.is_ready());
        let value = h.get().unwrap();
        assert!((value - expected).abs() < 1e-9);
    }
}

#[test]
fn batch_submit_void_return() {
    let pool = DynamicPool::new();
    let counter = Arc::new(AtomicUsize::new(0));

    let tasks = (0..100_000).map(|_| {
        let counter = Arc::clone(&counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    pool.submit_batch_void(tasks);
    pool.wait_for_tasks();

    assert_eq!(counter.load(Ordering::SeqCst), 100_000);
}

#[test]
fn steady_fan_out() {
    let pool = SteadyPool::with_workers(8);

    let handles = pool.submit_batch((0..1_000_000).map(|i| move || i));
    let mut seen: HashSet<usize> = HashSet::with_capacity(1_000_000);
    for h in handles {
        seen.insert(h.get().unwrap());
    }

    assert_eq!(seen.len(), 1_000_000);
    assert!(seen.contains(&0));
    assert!(seen.contains(&999_999));
}

#[test]
fn exception_propagation_does_not_kill_pool() {
    let pool = DynamicPool::with_workers(2);

    let bad = pool.submit_task(|| -> i32 { panic!("distinguished failure") });
    let err = bad.get().unwrap_err();
    assert!(matches!(err, threadpool::PoolError::TaskPanicked(_)));

    let good = pool.submit_task(|| 42);
    assert_eq!(good.get().unwrap(), 42);
}

#[test]
fn ordering_within_a_producer_dynamic_single_worker() {
    let pool = DynamicPool::with_workers(1);
    let order = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..500)
        .map(|i| {
            let order = Arc::clone(&order);
            pool.submit_task(move || {
                order.lock().unwrap().push(i);
                i
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.get().unwrap(), i);
    }

    let recorded = order.lock().unwrap();
    let expected: Vec<usize> = (0..500).collect();
    assert_eq!(*recorded, expected);
}

#[test]
fn ordering_within_a_producer_dynamic_many_workers_is_a_permutation() {
    let pool = DynamicPool::with_workers(4);
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..2_000 {
        let order = Arc::clone(&order);
        pool.spawn_void(move || {
            order.lock().unwrap().push(i);
        });
    }
    pool.wait_for_tasks();

    let mut recorded = order.lock().unwrap().clone();
    recorded.sort_unstable();
    assert_eq!(recorded, (0..2_000).collect::<Vec<_>>());
}

#[test]
fn shutdown_safety_force_stop_is_bounded() {
    let pool = DynamicPool::with_workers(4);
    let started = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));

    for _ in 0..10_000 {
        let started = Arc::clone(&started);
        let finished = Arc::clone(&finished);
        pool.spawn_void(move || {
            started.fetch_add(1, Ordering::SeqCst);
            finished.fetch_add(1, Ordering::SeqCst);
        });
    }

    pool.force_stop();

    let start = Instant::now();
    drop(pool);
    assert!(start.elapsed() < Duration::from_secs(10));

    // Every started task ran to completion; none was interrupted mid-flight.
    assert_eq!(started.load(Ordering::SeqCst), finished.load(Ordering::SeqCst));
}

#[test]
fn wait_for_tasks_is_idempotent_on_quiescent_pool() {
    let pool = SteadyPool::with_workers(2);
    pool.submit_task(|| 1).get().unwrap();
    pool.wait_for_tasks();
    pool.wait_for_tasks();
}

#[test]
fn force_stop_is_idempotent() {
    let pool = DynamicPool::with_workers(2);
    pool.force_stop();
    pool.force_stop();
}

#[test]
fn single_worker_pools_behave_as_fifo() {
    let dynamic = DynamicPool::with_workers(1);
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..200 {
        let order = Arc::clone(&order);
        dynamic.spawn_void(move || order.lock().unwrap().push(i));
    }
    dynamic.wait_for_tasks();
    assert_eq!(*order.lock().unwrap(), (0..200).collect::<Vec<_>>());

    let steady = SteadyPool::with_workers(1);
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..200 {
        let order = Arc::clone(&order);
        steady.spawn_void(move || order.lock().unwrap().push(i));
    }
    steady.wait_for_tasks();
    assert_eq!(*order.lock().unwrap(), (0..200).collect::<Vec<_>>());
}

#[test]
fn submit_after_force_stop_is_rejected_on_both_pools() {
    let dynamic = DynamicPool::with_workers(2);
    dynamic.force_stop();
    let handle = dynamic.submit_task(|| 1);
    assert!(matches!(handle.get(), Err(threadpool::PoolError::PoolStopped)));

    let steady = SteadyPool::with_workers(2);
    steady.force_stop();
    let handle = steady.submit_task(|| 1);
    assert!(matches!(handle.get(), Err(threadpool::PoolError::PoolStopped)));
}

#[test]
fn steady_submit_batch_void_drains() {
    let pool = SteadyPool::with_workers(4);
    let counter = Arc::new(AtomicUsize::new(0));
    let tasks = (0..10_000).map(|_| {
        let counter = Arc::clone(&counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    pool.submit_batch_void(tasks);
    pool.wait_for_tasks();
    assert_eq!(counter.load(Ordering::SeqCst), 10_000);
}

#[test]
fn draining_zero_tasks_returns_immediately() {
    let pool = DynamicPool::with_workers(3);
    let start = Instant::now();
    pool.wait_for_tasks();
    assert!(start.elapsed() < Duration::from_millis(100));

    let pool = SteadyPool::with_workers(3);
    let start = Instant::now();
    pool.wait_for_tasks();
    assert!(start.elapsed() < Duration::from_millis(100));
}
