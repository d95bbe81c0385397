//! Type-erased task box and its paired result handle.
//!
//! A [`TaskBox`] is a nullary, void-returning, move-only invocation — the
//! uniform queue element both pool engines operate on. The actual return
//! value of the user's callable is captured inside the closure and handed
//! off to the matching [`ResultHandle`] instead of flowing back through the
//! queue element itself, which keeps the queue homogeneous across
//! heterogeneous task return types.

use crate::error::{panic_message, PoolError, PoolResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};

/// A boxed, type-erased, nullary task. Invoked exactly once by a worker.
pub type TaskBox = Box<dyn FnOnce() + Send + 'static>;

enum Slot<R> {
    Pending,
    Ready(PoolResult<R>),
    Taken,
}

struct Inner<R> {
    slot: Mutex<Slot<R>>,
    ready: Condvar,
}

/// Single-consumer, one-shot future of a task's outcome.
///
/// Dropping the handle does not cancel the task — the worker runs it to
/// completion regardless of whether anyone is still waiting on the result.
pub struct ResultHandle<R> {
    inner: Arc<Inner<R>>,
}

impl<R> ResultHandle<R> {
    /// Block until the paired task completes, then return its outcome.
    ///
    /// Calling `get()` a second time on the same handle returns
    /// `Err(PoolError::HandleConsumed)` rather than blocking forever.
    pub fn get(&self) -> PoolResult<R> {
        let mut guard = self.inner.slot.lock().unwrap();
        loop {
            match &*guard {
                Slot::Pending => {
                    guard = self.inner.ready.wait(guard).unwrap();
                }
                Slot::Ready(_) => {
                    let taken = std::mem::replace(&mut *guard, Slot::Taken);
                    return match taken {
                        Slot::Ready(result) => result,
                        _ => unreachable!("checked above"),
                    };
                }
                Slot::Taken => return Err(PoolError::HandleConsumed),
            }
        }
    }

    /// True if the paired task has completed (and `get()` would not block).
    ///
    /// Does not consume the result; safe to poll repeatedly.
    pub fn is_ready(&self) -> bool {
        !matches!(&*self.inner.slot.lock().unwrap(), Slot::Pending)
    }
}

/// Build a [`ResultHandle`] that is already resolved to `Err(err)`.
///
/// Used by the pools to reject a submission after `force_stop()` without
/// routing a never-to-be-invoked closure through a worker: the caller gets
/// back a handle shaped exactly like any other, just pre-failed.
pub fn already_failed<R>(err: PoolError) -> ResultHandle<R> {
    let inner = Arc::new(Inner {
        slot: Mutex::new(Slot::Ready(Err(err))),
        ready: Condvar::new(),
    });
    ResultHandle { inner }
}

/// Wrap a callable into a [`TaskBox`] and its paired [`ResultHandle`].
///
/// The box, when invoked, runs `f`, catches any panic so a failing task
/// never takes a worker thread down with it, and delivers the outcome to
/// the handle.
pub fn make_task<F, R>(f: F) -> (TaskBox, ResultHandle<R>)
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let inner = Arc::new(Inner {
        slot: Mutex::new(Slot::Pending),
        ready: Condvar::new(),
    });
    let handle = ResultHandle {
        inner: Arc::clone(&inner),
    };

    let task: TaskBox = Box::new(move || {
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| PoolError::TaskPanicked(panic_message(payload)));
        let mut guard = inner.slot.lock().unwrap();
        *guard = Slot::Ready(outcome);
        drop(guard);
        inner.ready.notify_all();
    });

    (task, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_task_runs_and_returns() {
        let (task, handle) = make_task(|| 2 + 2);
        task();
        assert_eq!(handle.get().unwrap(), 4);
    }

    #[test]
    fn test_get_twice_errors() {
        let (task, handle) = make_task(|| "hello");
        task();
        assert_eq!(handle.get().unwrap(), "hello");
        assert!(matches!(handle.get(), Err(PoolError::HandleConsumed)));
    }

    #[test]
    fn test_panicking_task_surfaces_as_error() {
        let (task, handle) = make_task(|| -> i32 { panic!("kaboom") });
        task();
        match handle.get() {
            Err(PoolError::TaskPanicked(msg)) => assert_eq!(msg, "kaboom"),
            other => panic!("expected TaskPanicked, got {other:?}"),
        }
    }

    #[test]
    fn test_is_ready() {
        let (task, handle) = make_task(|| 1);
        assert!(!handle.is_ready());
        task();
        assert!(handle.is_ready());
    }

    #[test]
    fn test_already_failed_is_ready_immediately() {
        let handle: ResultHandle<i32> = already_failed(PoolError::PoolStopped);
        assert!(handle.is_ready());
        assert!(matches!(handle.get(), Err(PoolError::PoolStopped)));
    }

    #[test]
    fn test_runs_on_worker_thread() {
        let (task, handle) = make_task(|| std::thread::current().id());
        let caller_id = std::thread::current().id();
        let worker = std::thread::spawn(move || {
            task();
        });
        worker.join().unwrap();
        assert_ne!(handle.get().unwrap(), caller_id);
    }
}
