use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use threadpool_runtime::{DynamicPool, SteadyPool};

const TASKS_PER_ITER: usize = 1000;

enum PoolKind {
    Dynamic(DynamicPool),
    Steady(SteadyPool),
}

impl PoolKind {
    fn submit_task<F>(&self, f: F) -> threadpool_core::ResultHandle<usize>
    where
        F: FnOnce() -> usize + Send + 'static,
    {
        match self {
            PoolKind::Dynamic(p) => p.submit_task(f),
            PoolKind::Steady(p) => p.submit_task(f),
        }
    }
}

fn submit_and_drain(pool: &PoolKind, n: usize) {
    let handles: Vec<_> = (0..n)
        .map(|i| pool.submit_task(move || black_box(i).wrapping_mul(i)))
        .collect();
    for h in handles {
        let _ = h.get();
    }
}

fn bench_pools(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_1000_tasks");
    for workers in [2, 4, 8] {
        let dynamic = PoolKind::Dynamic(DynamicPool::with_workers(workers));
        group.bench_with_input(BenchmarkId::new("dynamic", workers), &dynamic, |b, pool| {
            b.iter(|| submit_and_drain(pool, TASKS_PER_ITER));
        });

        let steady = PoolKind::Steady(SteadyPool::with_workers(workers));
        group.bench_with_input(BenchmarkId::new("steady", workers), &steady, |b, pool| {
            b.iter(|| submit_and_drain(pool, TASKS_PER_ITER));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pools);
criterion_main!(benches);
