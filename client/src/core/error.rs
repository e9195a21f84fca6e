//! # Common Error Types
//!
//! Two layers of errors:
//!
//! - [`ApiError`]: one backend call failed. Carries the HTTP status and whatever
//!   message the backend put in the body, so screens can render it inline.
//! - [`AppError`]: application-level failures (configuration, state, client-side
//!   validation) plus any [`ApiError`] that bubbles up.
//!
//! ## Error Categories
//!
//! | Variant | Cause | User-facing text |
//! |---|---|---|
//! | `Network` | connection refused, timeout, DNS | the screen's generic fallback |
//! | `Validation` | 400 with per-field messages | first server message |
//! | `Unauthorized` | 401 | server message, login redirect |
//! | `Http` | any other non-2xx | server message or fallback |
//! | `Decode` | response did not match the expected shape | fallback |
//! | `Request` | request could not be built | fallback |
//!
//! ## Usage Pattern
//!
//! ```rust
//! use signal_client::core::error::ApiError;
//!
//! let err = ApiError::from_response(400, r#"{"error": "Only CSV files are allowed."}"#);
//! assert_eq!(err.user_message("Upload failed"), "Only CSV files are allowed.");
//!
//! let err = ApiError::Network("connection refused".into());
//! assert_eq!(err.user_message("Upload failed"), "Upload failed");
//! ```

use serde_json::Value;
use shared::FieldErrors;
use thiserror::Error;

/// Keys the backend uses for a single human-readable message, in lookup order.
const MESSAGE_KEYS: [&str; 3] = ["error", "message", "detail"];

/// Keys that never carry field errors.
const NON_FIELD_KEYS: [&str; 5] = ["error", "message", "detail", "success", "errors"];

/// A failed backend call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// 400 Bad Request, optionally with per-field messages.
    #[error("Validation failed: {}", validation_summary(.message, .fields))]
    Validation {
        message: Option<String>,
        fields: FieldErrors,
    },

    /// 401 Unauthorized.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("authentication required"))]
    Unauthorized { message: Option<String> },

    /// Any other non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    /// The body did not decode into the expected type.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request could not be constructed.
    #[error("Invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// The body is usually JSON, but Django's own error pages (CSRF failures, 500s)
    /// are HTML; those yield no server message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let value = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
        let message = message_of(&value);

        match status {
            400 => ApiError::Validation {
                message,
                fields: field_errors_of(&value),
            },
            401 => ApiError::Unauthorized { message },
            _ => ApiError::Http { status, message },
        }
    }

    /// Message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message, fields } => {
                message.as_deref().or_else(|| fields.first_message())
            }
            ApiError::Unauthorized { message } | ApiError::Http { message, .. } => {
                message.as_deref()
            }
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Request(_) => None,
        }
    }

    /// Text a screen renders: the backend message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Per-field messages of a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

fn validation_summary<'a>(message: &'a Option<String>, fields: &'a FieldErrors) -> &'a str {
    message
        .as_deref()
        .or_else(|| fields.first_message())
        .unwrap_or("invalid input")
}

fn message_of(value: &Value) -> Option<String> {
    MESSAGE_KEYS
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            // `{"error": ["..."]}`
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
}

fn field_errors_of(value: &Value) -> FieldErrors {
    // Registration wraps serializer errors in `errors`
    if let Some(nested) = value.get("errors") {
        return FieldErrors::from_value(nested).unwrap_or_default();
    }

    let Some(object) = value.as_object() else {
        return FieldErrors::default();
    };
    let fields: serde_json::Map<String, Value> = object
        .iter()
        .filter(|(key, _)| !NON_FIELD_KEYS.contains(&key.as_str()))
        .map(|(key, v)| (key.clone(), v.clone()))
        .collect();
    FieldErrors::from_value(&Value::Object(fields)).unwrap_or_default()
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API communication error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Application state management error.
    #[error("State error: {0}")]
    State(String),

    /// Input validation error.
    ///
    /// ```rust
    /// use signal_client::core::error::AppError;
    ///
    /// let err = AppError::Validation("Passwords don't match".to_string());
    /// assert_eq!(err.to_string(), "Validation error: Passwords don't match");
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result of a single backend call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
