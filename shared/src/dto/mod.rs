//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the client and the backend via the REST API (all paths under `/api`).
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration, current user, password reset, email verification
//! - [`analysis`] - Analyses, fitted parameters, uploads, evaluation, bulk delete
//! - [`share`] - Share settings and shared analysis access
//! - [`generator`] - Synthetic signal generator request/response
//! - [`profile`] - Extended profile and profile updates
//! - [`errors`] - Field-level validation errors
//! - [`decode`] - Tolerant decoders for double-encoded JSON columns
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login/
//! Content-Type: application/json
//! X-CSRFToken: 3kD9...
//!
//! { "username": "alice", "password": "s3cret-pass" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! {
//!   "user": { "id": 1, "username": "alice", "email": "alice@example.com",
//!             "first_name": "", "last_name": "", "date_joined": "2024-01-01T00:00:00Z" },
//!   "message": "Login successful"
//! }
//! ```

pub mod analysis;
pub mod auth;
pub mod decode;
pub mod errors;
pub mod generator;
pub mod profile;
pub mod share;

pub use analysis::*;
pub use auth::*;
pub use errors::*;
pub use generator::*;
pub use profile::*;
pub use share::*;
