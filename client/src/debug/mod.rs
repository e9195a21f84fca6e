//! # Logging and Task Tracing
//!
//! File-based structured logging for the client, plus lifecycle logging for the
//! background tasks the [`App`](crate::app::App) spawns.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/signal-client.log` with daily rotation
//! - **JSON output**: optional, one event per line
//! - **Async task tracking**: spawn/complete logging and slow task warnings
//! - **Request spans**: every HTTP call runs in an `api_request` span with a request id
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signal_client::debug;
//!
//! # async fn demo() {
//! // Initialize at startup
//! debug::init();
//!
//! debug::spawn_tracked("session_restore", async move {
//!     tracing::info!(endpoint = "/api/auth/user/", "Checking session");
//! });
//! # }
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `signal_client=info,warn`)
//! - `SIGNAL_CLIENT_LOG_DIR`: Log directory (default `logs`)
//! - `SIGNAL_CLIENT_LOG_STDERR`: Mirror logs to stderr (1=on)
//! - `SIGNAL_CLIENT_LOG_JSON`: JSON file output (1=on)
//! - `SIGNAL_CLIENT_SLOW_TASK_SECS`: Slow task threshold (default 30)

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::{init as init_logger, init_with as init_logger_with};
pub use task_tracker::{active_task_count, set_slow_task_threshold, spawn_tracked};

/// Initialize logging and task tracking from the environment.
///
/// Call at startup, before the first request.
pub fn init() {
    let config = DebugConfig::from_env();
    set_slow_task_threshold(config.slow_task_secs);
    init_logger_with(&config);
}
