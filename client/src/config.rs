//! # Client Configuration
//!
//! Loaded from environment variables (after reading a `.env` file, if present)
//! and validated before the HTTP client is built.
//!
//! | Variable | Default |
//! |---|---|
//! | `SIGNAL_API_URL` | `http://localhost:8000/api` |
//! | `SIGNAL_FRONTEND_URL` | `http://localhost:3000` |
//! | `SIGNAL_HTTP_TIMEOUT_SECS` | `10` |
//! | `SIGNAL_CSRF_COOKIE` | `csrftoken` |
//! | `SIGNAL_CSRF_HEADER` | `X-CSRFToken` |

use crate::core::error::{AppError, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, without trailing slash (e.g. `http://localhost:8000/api`)
    pub api_base_url: String,

    /// Front-end origin, used to build share links shown to the user
    pub frontend_base_url: String,

    /// Per-request timeout in seconds.
    ///
    /// Valid range: 1-300
    pub timeout_secs: u64,

    /// Cookie the backend stores the CSRF token in
    pub csrf_cookie_name: String,

    /// Header the CSRF token is echoed back in
    pub csrf_header_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            frontend_base_url: DEFAULT_FRONTEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            csrf_header_name: DEFAULT_CSRF_HEADER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `api_base_url` with every other value defaulted.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal outside development
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("SIGNAL_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let frontend_base_url = lookup("SIGNAL_FRONTEND_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.frontend_base_url);

        let timeout_secs = match lookup("SIGNAL_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::Config(format!("SIGNAL_HTTP_TIMEOUT_SECS must be a valid number: {e}"))
            })?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            api_base_url,
            frontend_base_url,
            timeout_secs,
            csrf_cookie_name: lookup("SIGNAL_CSRF_COOKIE").unwrap_or(defaults.csrf_cookie_name),
            csrf_header_name: lookup("SIGNAL_CSRF_HEADER").unwrap_or(defaults.csrf_header_name),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("SIGNAL_API_URL", &self.api_base_url),
            ("SIGNAL_FRONTEND_URL", &self.frontend_base_url),
        ] {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| AppError::Config(format!("{name} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::Config(format!("{name} must use http or https")));
            }
        }

        if !(1..=300).contains(&self.timeout_secs) {
            return Err(AppError::Config(
                "SIGNAL_HTTP_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if self.csrf_cookie_name.is_empty() || self.csrf_header_name.is_empty() {
            return Err(AppError::Config("CSRF cookie and header names must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Public link for a shared analysis.
    pub fn share_url(&self, analysis_id: i64) -> String {
        format!("{}/share/{}", self.frontend_base_url, analysis_id)
    }
}
