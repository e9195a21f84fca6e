//! # Core Abstractions
//!
//! Core traits and error types shared by the services, the session and the screens.
//!
//! ## Modules
//!
//! - **[`error`]**: [`ApiError`] for a single backend call, [`AppError`] and `Result<T>`
//!   for everything above it
//! - **[`service`]**: the [`ApiService`] trait, one async method per backend endpoint
//!
//! ## Dependency Injection
//!
//! Screens take `&dyn ApiService` and the session holds an `Arc<dyn ApiService>`,
//! so tests can swap in any implementation:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use signal_client::config::ClientConfig;
//! use signal_client::core::ApiService;
//! use signal_client::services::api::ApiClient;
//!
//! let client = ApiClient::new(ClientConfig::default()).unwrap();
//! let api: Arc<dyn ApiService> = Arc::new(client);
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, ApiResult, AppError, Result};
pub use service::ApiService;
