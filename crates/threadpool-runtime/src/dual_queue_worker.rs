//! Per-worker dual-queue engine used by [`crate::steady_pool::SteadyPool`].
//!
//! Each worker owns two queues: a `buffer_q` that callers push into, and a
//! `work_q` that the worker itself drains. The two are only ever connected
//! by a cheap pointer swap under a spinlock, so producers never contend
//! with the worker over the queue it's actively draining.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use threadpool_core::task::TaskBox;
use threadpool_core::SpinLock;

/// One worker's half of the `SteadyPool` engine: a swappable pair of task
/// queues plus the bookkeeping needed to report load and to drain cleanly.
pub struct DualQueueWorker {
    buffer_q: SpinLock<VecDeque<TaskBox>>,
    work_q: SpinLock<VecDeque<TaskBox>>,
    outstanding: AtomicUsize,
    stop: AtomicBool,
    drain_lock: Mutex<()>,
    drain_cv: Condvar,
}

impl DualQueueWorker {
    pub fn new() -> Self {
        DualQueueWorker {
            buffer_q: SpinLock::new(VecDeque::new()),
            work_q: SpinLock::new(VecDeque::new()),
            outstanding: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            drain_lock: Mutex::new(()),
            drain_cv: Condvar::new(),
        }
    }

    /// Approximate number of tasks this worker has queued or is running.
    ///
    /// Used by `SteadyPool` dispatch to pick the least-loaded worker; it's
    /// read without synchronizing with a concurrent push, so it's a
    /// snapshot, not a guarantee.
    pub fn load(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Push a task into this worker's buffer queue.
    pub fn enqueue(&self, task: TaskBox) {
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        self.buffer_q.lock().push_back(task);
    }

    /// Push a whole batch of tasks under a single spinlock acquisition.
    ///
    /// Mirrors `DynamicPool::submit_batch`'s single-lock amortization, just
    /// against this worker's `buffer_q` instead of a pool-wide queue mutex.
    pub fn enqueue_batch(&self, tasks: impl IntoIterator<Item = TaskBox>) {
        let mut buffer = self.buffer_q.lock();
        let before = buffer.len();
        buffer.extend(tasks);
        let added = buffer.len() - before;
        drop(buffer);
        self.outstanding.fetch_add(added, Ordering::Relaxed);
    }

    /// Move everything waiting in `buffer_q` into `work_q` under the spinlock,
    /// returning true if there was anything to move.
    ///
    /// Called only from the worker's own thread.
    fn try_swap(&self) -> bool {
        let mut buffer = self.buffer_q.lock();
        if buffer.is_empty() {
            return false;
        }
        let mut work = self.work_q.lock();
        work.append(&mut buffer);
        true
    }

    fn task_done(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _guard = self.drain_lock.lock().unwrap();
            self.drain_cv.notify_all();
        }
    }

    fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Block until this worker has no outstanding tasks.
    pub fn wait_for_local_tasks(&self) {
        let guard = self.drain_lock.lock().unwrap();
        let _guard = self
            .drain_cv
            .wait_while(guard, |_| self.outstanding.load(Ordering::Acquire) != 0)
            .unwrap();
    }

    /// Run this worker's busy loop: drain `work_q`, refill from `buffer_q`
    /// when it runs dry, and spin-yield rather than park when both queues
    /// are empty and `stop` hasn't been requested.
    ///
    /// Called from the thread this worker owns.
    pub fn run(&self) {
        loop {
            let task = {
                let mut work = self.work_q.lock();
                work.pop_front()
            };

            let Some(task) = task else {
                if self.should_stop() {
                    return;
                }
                if self.try_swap() {
                    continue;
                }
                std::thread::yield_now();
                continue;
            };

            task();
            self.task_done();
        }
    }
}

impl Default for DualQueueWorker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask this worker's `run()` loop to exit once `work_q` is fully drained.
///
/// Anything still sitting in `buffer_q` at that point is abandoned: this
/// mirrors `force_stop()` semantics on the pool that owns the worker.
pub fn request_stop(worker: &DualQueueWorker) {
    worker.request_stop();
}
