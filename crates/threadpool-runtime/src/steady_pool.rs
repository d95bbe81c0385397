//! Least-loaded dual-queue thread pool.
//!
//! Unlike [`crate::dynamic_pool::DynamicPool`], workers never sleep: each
//! owns its own queue pair and spin-yields when idle, trading idle CPU for
//! lower dispatch and wakeup latency. Good default choice for steady,
//! latency-sensitive workloads where a handful of busy-polling threads is
//! an acceptable cost.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use threadpool_core::task::{self, make_task, ResultHandle, TaskBox};
use threadpool_core::{log_warn, PoolError};

use crate::config::SteadyPoolConfig;
use crate::dual_queue_worker::{self, DualQueueWorker};

/// A thread pool backed by one dual-queue worker per thread, dispatching
/// each new task to whichever worker currently reports the least load.
pub struct SteadyPool {
    workers: Vec<Arc<DualQueueWorker>>,
    threads: Vec<JoinHandle<()>>,
    stopped: AtomicBool,
}

impl SteadyPool {
    /// Spawn a pool using configuration from the environment.
    pub fn new() -> Self {
        Self::with_config(SteadyPoolConfig::from_env())
    }

    /// Spawn a pool with an explicit number of worker threads.
    pub fn with_workers(num_workers: usize) -> Self {
        Self::with_config(SteadyPoolConfig::from_env().num_workers(num_workers))
    }

    /// Spawn a pool with an explicit configuration.
    pub fn with_config(config: SteadyPoolConfig) -> Self {
        let num_workers = config.num_workers.max(1);
        if config.debug_logging {
            threadpool_core::kprint::set_log_level(threadpool_core::kprint::LogLevel::Debug);
        }

        let workers: Vec<Arc<DualQueueWorker>> =
            (0..num_workers).map(|_| Arc::new(DualQueueWorker::new())).collect();

        let mut threads = Vec::with_capacity(num_workers);
        for (id, worker) in workers.iter().enumerate() {
            let worker = Arc::clone(worker);
            let handle = thread::Builder::new()
                .name(format!("steady-pool-{id}"))
                .spawn(move || {
                    threadpool_core::kprint::set_worker_id(id as u32);
                    worker.run();
                    threadpool_core::kprint::clear_worker_id();
                })
                .expect("failed to spawn steady pool worker");
            threads.push(handle);
        }

        SteadyPool {
            workers,
            threads,
            stopped: AtomicBool::new(false),
        }
    }

    /// Number of worker threads in this pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    fn least_loaded(&self) -> &Arc<DualQueueWorker> {
        self.workers
            .iter()
            .min_by_key(|w| w.load())
            .expect("pool has at least one worker")
    }

    /// Submit a task and get back a handle to its result.
    ///
    /// Dispatched to whichever worker currently reports the least load.
    /// Submitting after `force_stop()` rejects the task: the returned
    /// handle is immediately ready with `Err(PoolError::PoolStopped)` and
    /// `f` never runs.
    pub fn submit_task<F, R>(&self, f: F) -> ResultHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.stopped.load(Ordering::Acquire) {
            log_warn!("submit_task called after force_stop(); task rejected");
            return task::already_failed(PoolError::PoolStopped);
        }
        let (task, handle) = make_task(f);
        self.least_loaded().enqueue(task);
        handle
    }

    /// Submit a batch of tasks, returning one handle per task in order.
    pub fn submit_batch<F, R>(&self, tasks: impl IntoIterator<Item = F>) -> Vec<ResultHandle<R>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        tasks.into_iter().map(|f| self.submit_task(f)).collect()
    }

    /// Submit a batch of fire-and-forget tasks in one shot.
    ///
    /// Unlike `submit_batch`, the whole batch is handed to a single
    /// least-loaded worker under one spinlock acquisition
    /// (`DualQueueWorker::enqueue_batch`), amortising lock cost the same
    /// way `DynamicPool::submit_batch` amortises its queue mutex. A panic
    /// inside any task is logged and swallowed since there is no handle to
    /// report it through.
    pub fn submit_batch_void<F>(&self, tasks: impl IntoIterator<Item = F>)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.stopped.load(Ordering::Acquire) {
            log_warn!("submit_batch_void called after force_stop(); batch rejected");
            return;
        }
        let boxed: Vec<TaskBox> = tasks
            .into_iter()
            .map(|f| {
                let (task, _handle) = make_task(f);
                task
            })
            .collect();
        if boxed.is_empty() {
            return;
        }
        self.least_loaded().enqueue_batch(boxed);
    }

    /// Fire-and-forget a single task. A panic is logged and swallowed.
    pub fn spawn_void<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _: ResultHandle<()> = self.submit_task(f);
    }

    /// Block until every worker has drained its local queues.
    pub fn wait_for_tasks(&self) {
        for worker in &self.workers {
            worker.wait_for_local_tasks();
        }
    }

    /// Ask every worker to exit once its current `work_q` has drained.
    ///
    /// Anything still sitting in a worker's `buffer_q` at that point is
    /// abandoned rather than run. Idempotent: a second call finds every
    /// worker's stop flag already set and is a no-op beyond the re-store.
    pub fn force_stop(&self) {
        self.stopped.store(true, Ordering::Release);
        for worker in &self.workers {
            dual_queue_worker::request_stop(worker);
        }
    }
}

impl Default for SteadyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SteadyPool {
    fn drop(&mut self) {
        self.force_stop();
        for handle in self.threads.drain(..) {
            if let Err(e) = handle.join() {
                log_warn!("steady pool worker panicked during shutdown: {:?}", e);
            }
        }
    }
}
