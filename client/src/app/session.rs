//! # Auth Session Store
//!
//! [`Session`] is the single owner of the cached current user. It is created once
//! at startup, shared as `Arc<Session>` with whatever needs it (router guard,
//! screens, background tasks) and dropped at shutdown.
//!
//! The cache is a possibly stale copy: the basic user from the auth endpoints with
//! the extended profile fields merged in. The lock is only held for synchronous
//! reads and writes, never across an `.await`.

use crate::core::error::{ApiError, ApiResult};
use crate::core::service::ApiService;
use parking_lot::RwLock;
use shared::{
    ChangePasswordRequest, FieldErrors, LoginRequest, PasswordResetConfirmRequest,
    RegisterRequest, User, UserPatch,
};
use std::sync::Arc;

/// Snapshot of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    /// True until the first current-user check has settled
    pub loading: bool,
    initialized: bool,
    /// Bumped on every login, logout or clear
    generation: u64,
}

/// Signup form values as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password1: String,
    pub password2: String,
}

impl Registration {
    /// Backend field names for each form field that differs.
    pub const FIELD_MAP: [(&'static str, &'static str); 2] =
        [("password", "password1"), ("password_confirm", "password2")];

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            password: self.password1.clone(),
            password_confirm: self.password2.clone(),
        }
    }

    /// Move server field errors onto the form's field names.
    pub fn map_field_errors(fields: &mut FieldErrors) {
        for (server, form) in Self::FIELD_MAP {
            fields.rename(server, form);
        }
    }
}

/// Owned auth session context.
pub struct Session {
    api: Arc<dyn ApiService>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(api: Arc<dyn ApiService>) -> Arc<Self> {
        Arc::new(Self {
            api,
            state: RwLock::new(SessionState {
                loading: true,
                ..SessionState::default()
            }),
        })
    }

    /// Service the session talks to, for screens created from it.
    pub fn api(&self) -> Arc<dyn ApiService> {
        Arc::clone(&self.api)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Check the server session once. Later calls return the cached answer.
    ///
    /// Any failure counts as "not authenticated".
    pub async fn initialize(&self) -> bool {
        let generation = {
            let mut state = self.state.write();
            if state.initialized {
                return state.user.is_some();
            }
            state.initialized = true;
            state.loading = true;
            state.generation
        };

        let user = match self.api.current_user().await {
            Ok(response) if response.is_authenticated => response.user,
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, treating as anonymous");
                None
            }
        };

        let mut state = self.state.write();
        // A login or logout that finished while the check was in flight wins
        if state.generation == generation {
            state.user = user;
        } else {
            tracing::debug!("Session changed during check, keeping newer state");
        }
        state.loading = false;
        tracing::info!(authenticated = state.user.is_some(), "Session initialized");
        state.user.is_some()
    }

    /// Log in and cache the returned user. Returns the server message.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;

        let message = if response.message.is_empty() {
            "Login successful".to_string()
        } else {
            response.message
        };
        self.set_user(Some(response.user));
        Ok(message)
    }

    /// Register an account.
    ///
    /// The account has to be verified by email before it can log in, so no user
    /// is cached unless the server returns one. Field errors come back under the
    /// form's field names (`password1`, `password2`).
    pub async fn signup(&self, registration: &Registration) -> ApiResult<String> {
        match self.api.register(&registration.to_request()).await {
            Ok(response) => {
                if let Some(user) = response.user {
                    self.set_user(Some(user));
                }
                Ok(response.message)
            }
            Err(ApiError::Validation { message, mut fields }) => {
                Registration::map_field_errors(&mut fields);
                Err(ApiError::Validation { message, fields })
            }
            Err(e) => Err(e),
        }
    }

    /// Log out. The cached user is cleared whatever the network outcome.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.api.logout().await.map(|_| ());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Logout request failed, clearing session anyway");
        }
        self.set_user(None);
        result
    }

    /// Shallow-merge `patch` into the cached user. No-op when logged out.
    pub fn update_user(&self, patch: &UserPatch) {
        let mut state = self.state.write();
        match state.user.as_mut() {
            Some(user) => user.merge(patch),
            None => tracing::debug!("update_user ignored, no cached user"),
        }
    }

    /// Drop the cached user without a network call (session expired server-side).
    pub fn clear(&self) {
        self.set_user(None);
    }

    pub async fn request_password_reset(&self, email: &str) -> ApiResult<String> {
        Ok(self.api.request_password_reset(email.trim()).await?.message)
    }

    pub async fn confirm_password_reset(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> ApiResult<String> {
        let request = PasswordResetConfirmRequest {
            uid: uid.to_string(),
            token: token.to_string(),
            new_password: new_password.to_string(),
            new_password_confirm: new_password_confirm.to_string(),
        };
        Ok(self.api.confirm_password_reset(&request).await?.message)
    }

    pub async fn verify_email(&self, uid: &str, token: &str) -> ApiResult<String> {
        Ok(self.api.verify_email(uid, token).await?.message)
    }

    pub async fn change_password(&self, current: &str, new: &str) -> ApiResult<String> {
        let request = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        Ok(self.api.change_password(&request).await?.message)
    }

    /// Merge the extended profile into the cached user.
    pub async fn refresh_profile(&self) -> ApiResult<()> {
        let profile = self.api.profile().await?;
        self.update_user(&profile.to_patch());
        Ok(())
    }

    fn set_user(&self, user: Option<User>) {
        let mut state = self.state.write();
        state.user = user;
        state.loading = false;
        state.generation += 1;
    }
}
