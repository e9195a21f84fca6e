//! # Signal Predictor Client - Library Root
//!
//! Typed access layer for the Signal Predictor backend (a Django REST API that
//! fits sums of sinusoids to uploaded CSV signals), plus the session, router and
//! per-screen state models a front end needs on top of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              signal_client (this crate)                │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - App, Session, Router, screen models      │
//! │  services   - ApiClient (reqwest + cookie jar + CSRF)  │
//! │  core       - ApiService trait, ApiError / AppError    │
//! │  config     - ClientConfig from env / .env             │
//! │  debug      - tracing subscriber, task tracking        │
//! │  utils      - form validation                          │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP/JSON + multipart, session cookie
//!          ▼
//! ┌─────────────────────────────────┐
//! │  Backend API (/api/...)         │
//! └─────────────────────────────────┘
//! ```
//!
//! ## Module Dependency Graph
//!
//! ```text
//! app
//!   ├── session  ──► core::ApiService
//!   ├── screens  ──► core::ApiService, session
//!   └── router
//! services::api ──► implements core::ApiService, emits app::AppEvent
//! shared        ──► DTOs and display helpers used everywhere
//! ```
//!
//! ## Core Concepts
//!
//! ### Owned Session
//!
//! The logged-in user lives in one [`app::Session`], created at startup and
//! passed around as `Arc<Session>`. Its lock is never held across an `.await`.
//!
//! ### Cookie Auth with CSRF
//!
//! Every mutating request first primes `GET /csrf/` and sends the `csrftoken`
//! cookie back as `X-CSRFToken`. A 401 outside the credential endpoints turns
//! into [`app::AppEvent::Unauthorized`] and the app redirects to login.
//!
//! ### Event-Driven Actions
//!
//! User actions run on tokio; results come back as [`app::AppEvent`] over an
//! `async-channel` and are applied by [`app::App::process_events`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signal_client::app::screens::AnalysisListScreen;
//! use signal_client::{ApiClient, ClientConfig};
//!
//! # async fn demo() -> signal_client::Result<()> {
//! let client = ApiClient::new(ClientConfig::default())?;
//! let mut list = AnalysisListScreen::default();
//! if list.load(&client).await {
//!     for analysis in &list.analyses {
//!         println!("{}: {}", analysis.id, analysis.title());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Unit tests live next to the code; `tests/` runs the real client against an
//! in-process mock backend.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use app::{App, AppEvent, Route, Session};
pub use config::ClientConfig;
pub use core::{ApiError, ApiResult, ApiService, AppError, Result};
pub use services::ApiClient;
