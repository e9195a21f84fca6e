//! # Services Module
//!
//! External service integrations. The only external system is the backend REST API.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Session / Screens                       │
//! │        │  &dyn ApiService                │
//! │  ┌─────▼────────────┐                    │
//! │  │  ApiClient       │ cookie jar, CSRF,  │
//! │  │  (api/client.rs) │ tracing spans      │
//! │  └─────┬────────────┘                    │
//! └────────┼─────────────────────────────────┘
//!          │ HTTP/JSON, multipart
//!          ▼
//! ┌──────────────────────────────────────────┐
//! │  Backend (Django REST)                   │
//! │  /api/csrf/  /api/auth/*  /api/analyses/*│
//! │  /api/upload/  /api/share/*  /api/profile│
//! └──────────────────────────────────────────┘
//! ```

pub mod api;

pub use api::ApiClient;
