//! # threadpool-runtime
//!
//! The two pool engines this workspace provides:
//!
//! - [`DynamicPool`] - one shared FIFO queue, workers parked on a condvar
//!   when idle. Good default for bursty or low-throughput workloads.
//! - [`SteadyPool`] - one buffer/work queue pair per worker, dispatched by
//!   least-loaded, busy-yielding rather than parking. Good for steady,
//!   latency-sensitive workloads.
//!
//! Both accept tasks through `submit_task`/`submit_batch`, returning
//! `threadpool_core::ResultHandle`s, and both are safe to drop without an
//! explicit shutdown call.

#![allow(dead_code)]

pub mod config;
pub mod dual_queue_worker;
pub mod dynamic_pool;
pub mod steady_pool;

pub use config::{DynamicPoolConfig, SteadyPoolConfig};
pub use dynamic_pool::DynamicPool;
pub use steady_pool::SteadyPool;
