//! Error types shared by both pool engines.

use core::fmt;

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors that can occur while submitting to, or collecting from, a pool.
#[derive(Debug)]
#[non_exhaustive]
pub enum PoolError {
    /// The task's callable panicked instead of returning normally.
    ///
    /// The pool catches the panic so the worker thread survives; the
    /// payload is reduced to a displayable message since `Box<dyn Any + Send>`
    /// carries no `Display` impl of its own.
    TaskPanicked(String),

    /// `ResultHandle::get()` was called more than once on the same handle.
    HandleConsumed,

    /// `submit_task` / `submit_batch` / `submit_batch_void` was called after
    /// `force_stop()`; the task was not enqueued.
    PoolStopped,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::TaskPanicked(msg) => write!(f, "task panicked: {msg}"),
            PoolError::HandleConsumed => write!(f, "result handle already consumed"),
            PoolError::PoolStopped => write!(f, "pool has been stopped"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Reduce a `catch_unwind` payload to a displayable message.
///
/// Panics almost always carry either a `&'static str` (`panic!("literal")`)
/// or a `String` (`panic!("{}", x)`); anything else degrades to a generic
/// message rather than failing to construct the error at all.
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
