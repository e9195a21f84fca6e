//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Signal Predictor client and the
//! backend REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Authentication, registration and password flows
//!   - **[`dto::analysis`]**: Signal analyses, fitted parameters, uploads, evaluation
//!   - **[`dto::share`]**: Share options and public/password-gated access
//!   - **[`dto::generator`]**: Synthetic signal generation
//!   - **[`dto::profile`]**: Extended user profile
//!   - **[`dto::errors`]**: Per-field validation messages
//! - **[`utils`]**: Display formatting helpers (fixed precision, function strings, x-value parsing)
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** on both sides
//! - Optional response fields default when absent (`#[serde(default)]`)
//! - Optional request fields are omitted when `None`
//! - JSON columns that the backend sometimes double-encodes (`parameters`,
//!   `dominant_frequencies`) are decoded once at the DTO boundary, see [`dto::decode`]
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::analysis::Analysis;
//!
//! let json = r#"{
//!     "id": 7,
//!     "name": "",
//!     "display_name": "Analysis #7",
//!     "fitted_function": "f(x) = 1.000 * sin(2π * 0.100 * x + 0.000) + 0.000",
//!     "parameters": "{\"sinusoidal_components\": [], \"offset\": 0.5}",
//!     "dominant_frequencies": [[0.1, 1.0]]
//! }"#;
//!
//! let analysis: Analysis = serde_json::from_str(json).unwrap();
//! assert_eq!(analysis.parameters.offset, 0.5);
//! assert_eq!(analysis.title(), "Analysis #7");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
