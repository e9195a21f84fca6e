//! # Application Events
//!
//! Event types for async task communication between background tasks and the main loop.

/// Async task results sent to the main loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A request was rejected with 401 outside the credential endpoints
    Unauthorized { path: String },
    /// Session restore finished
    SessionRestored { authenticated: bool },
    /// Login completed (server message or error text)
    LoginResult(Result<String, String>),
    /// Logout completed; the cached user is already gone
    LogoutComplete,
    /// Loading state
    Loading(String),
}
