//! # Utility Functions
//!
//! Client-side helpers used by the screen models.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form input checks (email, username, password)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Display formatting shared with the DTOs
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
