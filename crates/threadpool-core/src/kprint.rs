//! Leveled, worker-aware debug print macros.
//!
//! Provides thread-safe debug output similar to Linux kernel's printk, used
//! by the pool engines instead of pulling in the `log`/`tracing` crates:
//! the scheduler loop logs a handful of lifecycle events (worker spawn,
//! `force_stop`, a swallowed panic in a fire-and-forget task) and doesn't
//! need a subscriber/registry ecosystem to do it.
//!
//! # Environment Variables
//!
//! - `TP_FLUSH_LOG=1` - Flush stderr after each print (useful for debugging crashes)
//! - `TP_LOG_LEVEL=<level>` - Set log level: 0=off, 1=error, 2=warn, 3=info, 4=debug, 5=trace
//! - `TP_LOG_TIME=1` - Include nanosecond timestamp in output
//!
//! # Output Format
//!
//! Without timestamp: `[LEVEL] [w<worker>] message`
//! With timestamp:    `[LEVEL] [<ns>] [w<worker>] message`
//!
//! Examples:
//! - `[DEBUG] [w0] spawned worker`
//! - `[INFO]  [12345678] [w2] draining`
//! - `[ERROR] [w--] fire-and-forget task panicked: boom`
//!
//! # Usage
//!
//! ```ignore
//! use threadpool_core::{log_info, log_warn, log_error};
//!
//! log_info!("worker {} started", id);
//! log_warn!("unexpected state: {:?}", state);
//! log_error!("fire-and-forget task panicked: {msg}");
//! ```

use crate::env::env_get_bool;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Instant;

/// Log levels (matches common conventions)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

// Global configuration (initialized once)
static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

// Start time for relative timestamps
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize logging from environment variables.
///
/// Called automatically on first log, but can be called explicitly for
/// deterministic initialization.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    START_TIME.get_or_init(Instant::now);

    FLUSH_ENABLED.store(env_get_bool("TP_FLUSH_LOG", false), Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("TP_LOG_TIME", false), Ordering::Relaxed);

    if let Ok(val) = std::env::var("TP_LOG_LEVEL") {
        let level = match val.to_lowercase().as_str() {
            "off" | "0" => LogLevel::Off,
            "error" | "1" => LogLevel::Error,
            "warn" | "2" => LogLevel::Warn,
            "info" | "3" => LogLevel::Info,
            "debug" | "4" => LogLevel::Debug,
            "trace" | "5" => LogLevel::Trace,
            _ => LogLevel::Info,
        };
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }
}

/// Check if flush is enabled
#[inline]
pub fn flush_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    FLUSH_ENABLED.load(Ordering::Relaxed)
}

/// Check if timestamp is enabled
#[inline]
pub fn time_enabled() -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    TIME_ENABLED.load(Ordering::Relaxed)
}

/// Get current log level
#[inline]
pub fn log_level() -> LogLevel {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level programmatically
pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Set flush mode programmatically
pub fn set_flush_enabled(enabled: bool) {
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Set time display programmatically
pub fn set_time_enabled(enabled: bool) {
    TIME_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if a log level is enabled
#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level as u8 <= log_level() as u8
}

/// Get elapsed nanoseconds since start
#[inline]
pub fn elapsed_ns() -> u64 {
    let start = START_TIME.get_or_init(Instant::now);
    start.elapsed().as_nanos() as u64
}

// Thread-local worker id, set by the runtime when a worker thread starts.
thread_local! {
    static WORKER_ID: std::cell::Cell<Option<u32>> = const { std::cell::Cell::new(None) };
}

/// Set current worker ID for this thread (called by the runtime).
pub fn set_worker_id(id: u32) {
    WORKER_ID.with(|w| w.set(Some(id)));
}

/// Clear worker ID (called by the runtime on thread exit).
pub fn clear_worker_id() {
    WORKER_ID.with(|w| w.set(None));
}

/// Get current worker ID.
#[inline]
pub fn get_worker_id() -> Option<u32> {
    WORKER_ID.with(|w| w.get())
}

fn format_context() -> String {
    match get_worker_id() {
        Some(id) => format!("[w{id}]"),
        None => "[w--]".to_string(),
    }
}

/// Internal: leveled print with worker context.
#[doc(hidden)]
pub fn _klog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }

    let stderr = std::io::stderr();
    let mut handle = stderr.lock();

    let _ = write!(handle, "{} ", level.prefix());

    if time_enabled() {
        let _ = write!(handle, "[{}] ", elapsed_ns());
    }

    let _ = write!(handle, "{} ", format_context());

    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");

    if flush_enabled() {
        let _ = handle.flush();
    }
}

/// Error level log with worker context.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::Error, format_args!($($arg)*));
    }};
}

/// Warning level log with worker context.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::Warn, format_args!($($arg)*));
    }};
}

/// Info level log with worker context.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::Info, format_args!($($arg)*));
    }};
}

/// Debug level log with worker context.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::Debug, format_args!($($arg)*));
    }};
}

/// Trace level log with worker context.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::Trace, format_args!($($arg)*));
    }};
}
