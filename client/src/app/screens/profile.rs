//! Profile page and the edit form.

use crate::app::session::Session;
use crate::core::error::ApiError;
use crate::core::service::ApiService;
use shared::{Analysis, FieldErrors, ProfilePicture, ProfileUpdate, UserProfile};

pub const UPDATE_FAILED: &str = "Failed to update profile. Please try again.";
pub const UPDATED: &str = "Profile updated successfully!";

/// Analyses listed on the profile page.
pub const RECENT_ANALYSES: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ProfileScreen {
    pub profile: Option<UserProfile>,
    pub recent_analyses: Vec<Analysis>,
    pub total_analyses: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileScreen {
    /// Load the profile and the analysis list. Either may fail on its own.
    pub async fn load(&mut self, api: &dyn ApiService) -> bool {
        self.loading = true;
        self.error = None;

        let profile = api.profile().await;
        let analyses = api.list_analyses().await;
        self.loading = false;

        match analyses {
            Ok(mut analyses) => {
                self.total_analyses = analyses.len();
                analyses.truncate(RECENT_ANALYSES);
                self.recent_analyses = analyses;
            }
            Err(e) => tracing::warn!(error = %e, "Error loading analyses"),
        }

        match profile {
            Ok(profile) => {
                self.profile = Some(profile);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error loading profile");
                self.error = Some(e.user_message("Failed to load profile"));
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditProfileScreen {
    pub form: ProfileUpdate,
    /// Current picture URL, or none
    pub picture_url: Option<String>,
    pub errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl EditProfileScreen {
    /// Prefill from the server profile, falling back to the cached session user.
    pub async fn load(&mut self, api: &dyn ApiService, session: &Session) -> bool {
        self.loading = true;
        let outcome = api.profile().await;
        self.loading = false;

        match outcome {
            Ok(profile) => {
                let cached = session.current_user();
                self.form = ProfileUpdate::prefill(&profile, cached.as_ref());
                self.picture_url = profile.profile_picture.clone();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error loading profile");
                false
            }
        }
    }

    pub fn set_picture(&mut self, picture: ProfilePicture) {
        self.form.picture = Some(picture);
    }

    /// Forget the error of a field the user is editing.
    pub fn touch(&mut self, field: &str) {
        self.errors.clear(field);
    }

    /// Send the form. On success the session user is updated from the response.
    pub async fn submit(&mut self, api: &dyn ApiService, session: &Session) -> bool {
        self.loading = true;
        self.errors = FieldErrors::new();
        self.error = None;
        self.success = None;
        let outcome = api.update_profile(self.form.clone()).await;
        self.loading = false;

        match outcome {
            Ok(profile) => {
                session.update_user(&profile.to_patch());
                self.picture_url = profile.profile_picture;
                self.form.picture = None;
                self.success = Some(UPDATED.to_string());
                true
            }
            Err(ApiError::Validation { message, fields }) => {
                self.errors = fields;
                self.error = message.or_else(|| {
                    self.errors
                        .is_empty()
                        .then(|| UPDATE_FAILED.to_string())
                });
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile update error");
                self.error = Some(e.user_message(UPDATE_FAILED));
                false
            }
        }
    }
}
