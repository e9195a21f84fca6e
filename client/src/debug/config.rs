//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "signal_client=info,warn";
pub const LOG_FILE_NAME: &str = "signal-client.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log directory (daily rotation inside it)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "signal_client=debug,info")
    pub log_level: String,
    /// Mirror logs to stderr
    pub log_to_stderr: bool,
    /// Write the file log as JSON lines
    pub json: bool,
    /// Warn when a tracked task runs longer than this
    pub slow_task_secs: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            json: false,
            slow_task_secs: 30,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        let defaults = Self::default();

        Self {
            log_dir: lookup("SIGNAL_CLIENT_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_to_stderr: flag("SIGNAL_CLIENT_LOG_STDERR").unwrap_or(defaults.log_to_stderr),
            json: flag("SIGNAL_CLIENT_LOG_JSON").unwrap_or(defaults.json),
            slow_task_secs: lookup("SIGNAL_CLIENT_SLOW_TASK_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.slow_task_secs),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SIGNAL_CLIENT_LOG_DIR", "/tmp/signal"),
            ("RUST_LOG", "signal_client=debug"),
            ("SIGNAL_CLIENT_LOG_STDERR", "1"),
            ("SIGNAL_CLIENT_SLOW_TASK_SECS", "nope"),
        ]);
        let config = DebugConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.log_file(), PathBuf::from("/tmp/signal/signal-client.log"));
        assert!(config.log_to_stderr);
        assert!(config.is_debug_enabled());
        assert!(!config.json);
        assert_eq!(config.slow_task_secs, 30);
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(DebugConfig::from_lookup(|_| None), DebugConfig::default());
    }
}
