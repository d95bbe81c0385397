//! Shared-queue thread pool: a single FIFO guarded by a mutex/condvar pair,
//! with workers sleeping when there's nothing to do.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use threadpool_core::task::{self, make_task, ResultHandle, TaskBox};
use threadpool_core::{log_debug, log_warn};
use threadpool_core::PoolError;

use crate::config::DynamicPoolConfig;

struct Shared {
    queue: Mutex<VecDeque<TaskBox>>,
    wake: Condvar,
    stop: AtomicBool,
    outstanding: AtomicUsize,
    draining: AtomicBool,
    drain_lock: Mutex<()>,
    drain_cv: Condvar,
}

impl Shared {
    fn push(&self, task: TaskBox) {
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        let mut q = self.queue.lock().unwrap();
        q.push_back(task);
        drop(q);
        self.wake.notify_one();
    }

    /// Push a whole batch of tasks under a single mutex acquisition, with a
    /// single bulk counter bump and a single wake-up. Amortises lock cost
    /// for fine-grained tasks instead of re-locking per item.
    fn push_batch(&self, tasks: Vec<TaskBox>) {
        if tasks.is_empty() {
            return;
        }
        self.outstanding.fetch_add(tasks.len(), Ordering::Relaxed);
        let mut q = self.queue.lock().unwrap();
        q.extend(tasks);
        drop(q);
        self.wake.notify_all();
    }

    fn task_done(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _guard = self.drain_lock.lock().unwrap();
            self.drain_cv.notify_all();
        }
    }

    fn worker_loop(self: Arc<Self>, id: usize) {
        threadpool_core::kprint::set_worker_id(id as u32);
        log_debug!("dynamic pool worker started");

        loop {
            let mut guard = self.queue.lock().unwrap();
            loop {
                if self.stop.load(Ordering::Acquire) {
                    log_debug!("dynamic pool worker exiting");
                    threadpool_core::kprint::clear_worker_id();
                    return;
                }
                if let Some(task) = guard.pop_front() {
                    drop(guard);
                    task();
                    self.task_done();
                    break;
                }
                guard = self.wake.wait(guard).unwrap();
            }
        }
    }
}

/// A thread pool backed by one shared FIFO task queue.
///
/// Workers block on a condvar when the queue is empty, rather than
/// busy-polling, which trades a little wakeup latency for near-zero idle
/// CPU usage. Good default choice for bursty or low-throughput workloads.
pub struct DynamicPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl DynamicPool {
    /// Spawn a pool using configuration from the environment.
    pub fn new() -> Self {
        Self::with_config(DynamicPoolConfig::from_env())
    }

    /// Spawn a pool with an explicit number of worker threads.
    pub fn with_workers(num_workers: usize) -> Self {
        Self::with_config(DynamicPoolConfig::from_env().num_workers(num_workers))
    }

    /// Spawn a pool with an explicit configuration.
    pub fn with_config(config: DynamicPoolConfig) -> Self {
        let num_workers = config.num_workers.max(1);
        if config.debug_logging {
            threadpool_core::kprint::set_log_level(threadpool_core::kprint::LogLevel::Debug);
        }

        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            wake: Condvar::new(),
            stop: AtomicBool::new(false),
            outstanding: AtomicUsize::new(0),
            draining: AtomicBool::new(false),
            drain_lock: Mutex::new(()),
            drain_cv: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("dynamic-pool-{id}"))
                .spawn(move || shared.worker_loop(id))
                .expect("failed to spawn dynamic pool worker");
            workers.push(handle);
        }

        DynamicPool { shared, workers }
    }

    /// Number of worker threads in this pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Submit a task and get back a handle to its result.
    ///
    /// Panics inside `f` are caught and surfaced through the handle as
    /// `PoolError::TaskPanicked` rather than killing the worker. Submitting
    /// after `force_stop()` rejects the task: the returned handle is
    /// immediately ready with `Err(PoolError::PoolStopped)` and `f` never
    /// runs.
    pub fn submit_task<F, R>(&self, f: F) -> ResultHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.shared.stop.load(Ordering::Acquire) {
            log_warn!("submit_task called after force_stop(); task rejected");
            return task::already_failed(PoolError::PoolStopped);
        }
        let (task, handle) = make_task(f);
        self.shared.push(task);
        handle
    }

    /// Submit a batch of tasks, returning one handle per task in order.
    ///
    /// Builds every task up front, then hands the whole batch to
    /// `Shared::push_batch` so `queue_mutex` is acquired once for the
    /// entire batch rather than once per task.
    pub fn submit_batch<F, R>(&self, tasks: impl IntoIterator<Item = F>) -> Vec<ResultHandle<R>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let boxed: Vec<(TaskBox, ResultHandle<R>)> =
            tasks.into_iter().map(make_task).collect();

        if self.shared.stop.load(Ordering::Acquire) {
            log_warn!("submit_batch called after force_stop(); batch rejected");
            return boxed
                .into_iter()
                .map(|_| task::already_failed(PoolError::PoolStopped))
                .collect();
        }

        let (tasks, handles): (Vec<TaskBox>, Vec<ResultHandle<R>>) = boxed.into_iter().unzip();
        self.shared.push_batch(tasks);
        handles
    }

    /// Submit a fire-and-forget task. A panic is logged and swallowed.
    pub fn submit_batch_void<F>(&self, tasks: impl IntoIterator<Item = F>)
    where
        F: FnOnce() + Send + 'static,
    {
        for f in tasks {
            self.spawn_void(f);
        }
    }

    /// Fire-and-forget a single task. A panic is logged and swallowed.
    pub fn spawn_void<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Nobody holds the handle, so a panic inside f() is discarded
        // rather than surfaced; submit_task() still protects the worker.
        let _: ResultHandle<()> = self.submit_task(f);
    }

    /// Block until every task submitted so far has completed.
    ///
    /// New tasks submitted concurrently from another thread may or may not
    /// be waited on; only the tasks outstanding at call time are guaranteed
    /// to be observed.
    pub fn wait_for_tasks(&self) {
        self.shared.draining.store(true, Ordering::Release);
        let guard = self.shared.drain_lock.lock().unwrap();
        let _guard = self
            .shared
            .drain_cv
            .wait_while(guard, |_| self.shared.outstanding.load(Ordering::Acquire) != 0)
            .unwrap();
        self.shared.draining.store(false, Ordering::Release);
    }

    /// Stop accepting new drain-completeness guarantees and ask all workers
    /// to exit once the current queue has drained.
    ///
    /// Any task already enqueued still runs to completion; this only stops
    /// workers from *sleeping forever* once the queue is empty.
    pub fn force_stop(&self) {
        self.shared.stop.store(true, Ordering::Release);
        self.shared.wake.notify_all();
    }
}

impl Default for DynamicPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DynamicPool {
    fn drop(&mut self) {
        self.force_stop();
        for handle in self.workers.drain(..) {
            if let Err(e) = handle.join() {
                log_warn!("dynamic pool worker panicked during shutdown: {:?}", e);
            }
        }
    }
}
