//! # threadpool
//!
//! Two in-process thread pool engines for running blocking closures off
//! the calling thread.
//!
//! - [`DynamicPool`] - a single shared FIFO queue; workers park on a
//!   condvar when there's nothing to do. Pick this for bursty or
//!   low-throughput workloads, where idle CPU matters more than the last
//!   few microseconds of dispatch latency.
//! - [`SteadyPool`] - one buffer/work queue pair per worker, dispatched by
//!   least current load; workers busy-yield instead of parking. Pick this
//!   for steady, latency-sensitive workloads where a handful of spinning
//!   threads is an acceptable cost.
//!
//! Both pools hand back a [`ResultHandle`] per submitted task. A panic
//! inside a task is caught and surfaces through the handle as
//! [`PoolError::TaskPanicked`] rather than taking the worker down.
//!
//! ## Quick Start
//!
//! ```
//! use threadpool::DynamicPool;
//!
//! let pool = DynamicPool::with_workers(4);
//! let handle = pool.submit_task(|| 2 + 2);
//! assert_eq!(handle.get().unwrap(), 4);
//! ```
//!
//! Dropping a pool stops it: `force_stop()` runs implicitly, and the
//! destructor blocks until every worker thread has joined.

pub use threadpool_core::{
    env_get, env_get_bool, env_get_opt, env_get_str, env_is_set, init_logging, set_flush_enabled,
    set_log_level, set_time_enabled, LogLevel, PoolError, PoolResult, ResultHandle,
};

pub use threadpool_core::{log_debug, log_error, log_info, log_trace, log_warn};

pub use threadpool_runtime::{DynamicPool, DynamicPoolConfig, SteadyPool, SteadyPoolConfig};
