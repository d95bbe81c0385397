//! Pool configuration.
//!
//! Provides compile-time defaults with runtime environment overrides, the
//! same priority order the rest of this workspace's ambient stack uses:
//! environment variables win over library defaults.
//!
//! ```rust
//! use threadpool_runtime::config::DynamicPoolConfig;
//!
//! // Use defaults with env overrides
//! let config = DynamicPoolConfig::from_env();
//!
//! // Or customize programmatically
//! let config = DynamicPoolConfig::from_env().num_workers(8);
//! ```

use threadpool_core::env::env_get;

mod defaults {
    /// `std::thread::available_parallelism()` is consulted first; this is
    /// only the fallback when that call fails.
    pub const NUM_WORKERS_FALLBACK: usize = 4;
    pub const DEBUG_LOGGING: bool = false;
}

fn default_num_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(defaults::NUM_WORKERS_FALLBACK)
}

/// Configuration for a [`crate::dynamic_pool::DynamicPool`].
#[derive(Debug, Clone)]
pub struct DynamicPoolConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Enable debug-level logging of lifecycle events.
    pub debug_logging: bool,
}

impl Default for DynamicPoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DynamicPoolConfig {
    /// Build from compile-time defaults with environment overrides.
    ///
    /// - `TP_NUM_WORKERS` - number of worker threads (default: hardware parallelism)
    /// - `TP_DEBUG` - enable debug logging (0/1)
    pub fn from_env() -> Self {
        Self {
            num_workers: env_get("TP_NUM_WORKERS", default_num_workers()),
            debug_logging: env_get("TP_DEBUG", defaults::DEBUG_LOGGING as u8 as usize) != 0,
        }
    }

    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }
}

/// Configuration for a [`crate::steady_pool::SteadyPool`].
#[derive(Debug, Clone)]
pub struct SteadyPoolConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Enable debug-level logging of lifecycle events.
    pub debug_logging: bool,
}

impl Default for SteadyPoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SteadyPoolConfig {
    /// Build from compile-time defaults with environment overrides.
    ///
    /// - `TP_NUM_WORKERS` - number of worker threads (default: hardware parallelism)
    /// - `TP_DEBUG` - enable debug logging (0/1)
    pub fn from_env() -> Self {
        Self {
            num_workers: env_get("TP_NUM_WORKERS", default_num_workers()),
            debug_logging: env_get("TP_DEBUG", defaults::DEBUG_LOGGING as u8 as usize) != 0,
        }
    }

    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn debug_logging(mut self, enable: bool) -> Self {
        self.debug_logging = enable;
        self
    }
}
