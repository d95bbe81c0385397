//! # threadpool-core
//!
//! Platform-agnostic leaves shared by both pool engines in `threadpool-runtime`.
//!
//! This crate spawns no threads itself. All `std::thread` usage lives in
//! `threadpool-runtime`.
//!
//! ## Modules
//!
//! - `task` - type-erased task box and its paired result handle
//! - `error` - error types
//! - `spinlock` - internal spinlock primitive
//! - `kprint` - leveled debug printing macros
//! - `env` - environment variable utilities

#![allow(dead_code)]

pub mod env;
pub mod error;
pub mod kprint;
pub mod spinlock;
pub mod task;

pub use env::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};
pub use error::{PoolError, PoolResult};
pub use spinlock::SpinLock;
pub use task::{make_task, ResultHandle, TaskBox};

// Re-export kprint macros for debug logging
pub use kprint::{init as init_logging, set_flush_enabled, set_log_level, set_time_enabled, LogLevel};

/// Constants shared by both pool engines.
pub mod constants {
    /// Maximum worker threads a single pool will spawn.
    ///
    /// Not a hard scheduling limit, just a sanity cap mirrored from the
    /// runtime this crate was split out of.
    pub const MAX_WORKERS: usize = 1024;
}
