//! # Backend API Client Module
//!
//! HTTP client for the Signal Predictor REST API (everything under `/api`).
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient, request dispatch, ApiService impl
//! ├── csrf.rs       - CSRF priming and cookie lookup
//! ├── auth.rs       - Login, register, logout, current user, password flows
//! ├── analysis.rs   - Home, upload, evaluate, analysis CRUD, bulk delete, session save
//! ├── share.rs      - Share options and public/password access
//! ├── generator.rs  - Synthetic signal generation
//! └── profile.rs    - Profile read and multipart update
//! ```

pub mod analysis;
pub mod auth;
pub mod client;
pub mod csrf;
pub mod generator;
pub mod profile;
pub mod share;

pub use client::ApiClient;
