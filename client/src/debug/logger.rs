//! File-based logging initialization

use super::config::{DebugConfig, DEFAULT_LOG_LEVEL, LOG_FILE_NAME};
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging from the environment.
///
/// See [`init_with`].
pub fn init() {
    init_with(&DebugConfig::from_env());
}

/// Initialize the logging system
///
/// Sets up:
/// - Daily rotated file log in `config.log_dir` (plain text or JSON lines)
/// - Optional stderr mirror
/// - Non-blocking writes so logging never stalls a request
///
/// Calling it again, or after another subscriber was installed, is a no-op.
pub fn init_with(config: &DebugConfig) {
    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .with_writer(non_blocking.clone())
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
    });
    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_current_span(true)
    });
    let stderr_layer = config
        .log_to_stderr
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(stderr_layer)
        .try_init();

    if installed.is_err() {
        // Someone else owns the global subscriber; drop our writer
        return;
    }

    tracing::info!(
        log_file = %config.log_file().display(),
        log_level = %config.log_level,
        json = config.json,
        stderr = config.log_to_stderr,
        "Logging initialized"
    );

    // Keep the writer alive for the lifetime of the program
    std::mem::forget(guard);
}
