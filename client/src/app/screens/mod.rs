//! # Screen Models
//!
//! One state model per page. A screen fetches on open, keeps its data, a
//! `loading` flag and an inline error message, and exposes its user actions as
//! async methods over `&dyn ApiService` (auth forms go through the [`Session`]).
//! Nothing is retried; the last response wins.
//!
//! Rendering is left to whatever front end drives these models.
//!
//! [`Session`]: crate::app::session::Session

pub mod analyses;
pub mod analysis_detail;
pub mod auth;
pub mod common;
pub mod generator;
pub mod home;
pub mod profile;
pub mod results;
pub mod share;
pub mod upload;

pub use analyses::{AnalysisListScreen, PendingDelete};
pub use analysis_detail::AnalysisDetailScreen;
pub use auth::{
    ChangePasswordForm, ForgotPasswordForm, LoginForm, ResetPasswordForm, SignupForm,
    VerifyEmailScreen, VerifyStatus,
};
pub use common::{EvaluationPanel, RenameDialog};
pub use generator::{GeneratorResultsScreen, GeneratorScreen};
pub use home::HomeScreen;
pub use profile::{EditProfileScreen, ProfileScreen};
pub use results::ResultsScreen;
pub use share::{ShareOptionsScreen, SharePasswordScreen, SharedAnalysisScreen, SharedState};
pub use upload::{UploadOutcome, UploadScreen};
