//! # Account Forms
//!
//! Login, signup, password flows and email verification. Each form keeps the
//! server's per-field messages in a [`FieldErrors`] keyed by its own field names.

use crate::app::router::Route;
use crate::app::session::{Registration, Session};
use crate::core::error::ApiError;
use crate::utils::validation::{validate_password_match, validate_required, ValidationResult};
use shared::FieldErrors;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const RESET_REQUEST_SENT: &str = "If the email exists, a reset link has been sent.";
pub const RESET_REQUEST_FAILED: &str = "Failed to request password reset.";
pub const RESET_DONE: &str = "Password has been reset successfully! Redirecting to login...";
pub const RESET_FAILED: &str = "Failed to reset password.";
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const CHANGE_FAILED: &str = "Failed to change password. Please try again.";
pub const EMAIL_VERIFIED: &str = "Your email has been verified! You can now log in.";
pub const VERIFICATION_FAILED: &str = "Verification failed.";
pub const VERIFICATION_LINK_INVALID: &str = "Verification link is invalid or expired.";

fn check(errors: &mut FieldErrors, field: &str, result: ValidationResult) {
    if let Some(message) = result.error {
        errors.push(field, message);
    }
}

/// Backend message followed by every field message, space separated.
fn all_messages(error: &ApiError) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    if let ApiError::Validation { message, fields } = error {
        parts.extend(message.as_deref());
        for (_, messages) in fields.iter() {
            parts.extend(messages.iter().map(String::as_str));
        }
    } else {
        parts.extend(error.server_message());
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginForm {
    /// Log in through the session. Returns true when the user is now cached.
    pub async fn submit(&mut self, session: &Session) -> bool {
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Username and password required".to_string());
            return false;
        }

        self.loading = true;
        self.error = None;
        let outcome = session.login(&self.username, &self.password).await;
        self.loading = false;

        match outcome {
            Ok(_) => {
                self.password.clear();
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FAILED));
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub registration: Registration,
    pub errors: FieldErrors,
    pub message: Option<String>,
    pub loading: bool,
}

impl SignupForm {
    /// Required fields only; the backend judges the rest.
    pub fn validate(&self) -> FieldErrors {
        let r = &self.registration;
        let mut errors = FieldErrors::new();
        check(&mut errors, "username", validate_required(&r.username, "Username"));
        check(&mut errors, "email", validate_required(&r.email, "Email"));
        check(&mut errors, "password1", validate_required(&r.password1, "Password"));
        check(
            &mut errors,
            "password2",
            validate_required(&r.password2, "Password confirmation"),
        );
        errors
    }

    /// Register. Success leads to the "check your inbox" page.
    pub async fn submit(&mut self, session: &Session) -> Option<Route> {
        self.message = None;
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }

        self.loading = true;
        let outcome = session.signup(&self.registration).await;
        self.loading = false;

        match outcome {
            Ok(_) => Some(Route::EmailVerificationSent),
            Err(ApiError::Validation { message, fields }) => {
                self.errors = fields;
                self.message = Some(message.unwrap_or_else(|| REGISTRATION_FAILED.to_string()));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration error");
                self.message = Some(e.user_message(REGISTRATION_FAILED));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl ForgotPasswordForm {
    pub async fn submit(&mut self, session: &Session) -> bool {
        self.message = None;
        self.error = validate_required(&self.email, "Email").error;
        if self.error.is_some() {
            return false;
        }

        self.loading = true;
        let outcome = session.request_password_reset(&self.email).await;
        self.loading = false;

        match outcome {
            // Same answer whether or not the address exists
            Ok(_) => {
                self.message = Some(RESET_REQUEST_SENT.to_string());
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(RESET_REQUEST_FAILED));
                false
            }
        }
    }
}

/// New password form reached from the emailed reset link.
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub uid: String,
    pub token: String,
    pub new_password: String,
    pub new_password_confirm: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl ResetPasswordForm {
    pub fn new(uid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    /// Returns `Some(Route::Login)` once the password was reset.
    pub async fn submit(&mut self, session: &Session) -> Option<Route> {
        self.message = None;
        self.error = validate_required(&self.new_password, "New password")
            .error
            .or(validate_required(&self.new_password_confirm, "Password confirmation").error);
        if self.error.is_some() {
            return None;
        }

        self.loading = true;
        let outcome = session
            .confirm_password_reset(
                &self.uid,
                &self.token,
                &self.new_password,
                &self.new_password_confirm,
            )
            .await;
        self.loading = false;

        match outcome {
            Ok(_) => {
                self.message = Some(RESET_DONE.to_string());
                Some(Route::Login)
            }
            Err(e) => {
                self.error = Some(all_messages(&e).unwrap_or_else(|| RESET_FAILED.to_string()));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub errors: FieldErrors,
    pub general_error: Option<String>,
    pub success: Option<String>,
    pub loading: bool,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check(
            &mut errors,
            "current_password",
            validate_required(&self.current_password, "Current password"),
        );
        check(
            &mut errors,
            "new_password",
            validate_required(&self.new_password, "New password"),
        );
        check(
            &mut errors,
            "confirm_password",
            validate_password_match(&self.new_password, &self.confirm_password),
        );
        errors
    }

    /// Change the password. Success returns to the profile page.
    pub async fn submit(&mut self, session: &Session) -> Option<Route> {
        self.success = None;
        self.general_error = None;
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }

        self.loading = true;
        let outcome = session
            .change_password(&self.current_password, &self.new_password)
            .await;
        self.loading = false;

        match outcome {
            Ok(_) => {
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
                self.success = Some(PASSWORD_CHANGED.to_string());
                Some(Route::Profile)
            }
            Err(ApiError::Validation { message, fields }) => {
                self.errors = fields;
                self.general_error = message;
                None
            }
            Err(e) => {
                self.general_error = Some(e.user_message(CHANGE_FAILED));
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    Pending,
    Verified(String),
    Failed(String),
}

/// Confirms the emailed verification link on open.
#[derive(Debug, Clone)]
pub struct VerifyEmailScreen {
    pub uid: String,
    pub token: String,
    pub status: VerifyStatus,
}

impl VerifyEmailScreen {
    pub fn new(uid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            token: token.into(),
            status: VerifyStatus::Pending,
        }
    }

    pub async fn verify(&mut self, session: &Session) -> bool {
        self.status = match session.verify_email(&self.uid, &self.token).await {
            Ok(_) => VerifyStatus::Verified(EMAIL_VERIFIED.to_string()),
            Err(ApiError::Validation { message, .. }) => {
                VerifyStatus::Failed(message.unwrap_or_else(|| VERIFICATION_FAILED.to_string()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Email verification error");
                VerifyStatus::Failed(VERIFICATION_LINK_INVALID.to_string())
            }
        };
        matches!(self.status, VerifyStatus::Verified(_))
    }
}
