//! # Sharing
//!
//! The owner's share settings, the public view of a shared analysis and the
//! standalone password prompt at `/analysis/{id}/share/password`.

use super::common::EvaluationPanel;
use crate::app::router::Route;
use crate::core::service::ApiService;
use shared::{Analysis, ShareOptions, ShareUpdateRequest, SharedAnalysisResponse};

pub const LOAD_OPTIONS_FAILED: &str = "Failed to load share options";
pub const UPDATE_OPTIONS_FAILED: &str = "Failed to update share settings";
pub const OPTIONS_UPDATED: &str = "Share settings updated successfully!";
pub const LOAD_SHARED_FAILED: &str = "Failed to load shared analysis";
pub const ACCESS_DENIED: &str = "Access denied";

/// Owner-side share settings.
#[derive(Debug, Clone, Default)]
pub struct ShareOptionsScreen {
    pub id: i64,
    pub options: Option<ShareOptions>,
    pub is_public: bool,
    /// New password; left empty to keep the current one
    pub password: String,
    pub saving: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ShareOptionsScreen {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Load the current settings. A missing analysis returns the route to fall back to.
    pub async fn load(&mut self, api: &dyn ApiService) -> Result<(), Option<Route>> {
        self.loading = true;
        self.error = None;
        let outcome = api.share_options(self.id).await;
        self.loading = false;

        match outcome {
            Ok(options) => {
                self.is_public = options.is_public;
                self.password.clear();
                self.options = Some(options);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(LOAD_OPTIONS_FAILED));
                Err((e.status() == Some(404)).then_some(Route::Analyses))
            }
        }
    }

    pub fn request(&self) -> ShareUpdateRequest {
        let password = self.password.trim();
        ShareUpdateRequest {
            is_public: self.is_public,
            password: (!password.is_empty()).then(|| password.to_string()),
        }
    }

    pub async fn save(&mut self, api: &dyn ApiService) -> bool {
        self.saving = true;
        self.error = None;
        self.success = None;
        let outcome = api.update_share_options(self.id, &self.request()).await;
        self.saving = false;

        match outcome {
            Ok(response) => {
                tracing::info!(
                    id = self.id,
                    is_public = response.is_public,
                    has_password = response.has_password,
                    "Share settings updated"
                );
                if let Some(options) = self.options.as_mut() {
                    options.is_public = response.is_public;
                    options.has_password = response.has_password;
                    options.public_url = response.public_url;
                }
                self.is_public = response.is_public;
                self.password.clear();
                self.success = Some(OPTIONS_UPDATED.to_string());
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(UPDATE_OPTIONS_FAILED));
                false
            }
        }
    }

    pub fn public_url(&self) -> Option<&str> {
        self.options
            .as_ref()
            .map(|o| o.public_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// What the public share page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedState {
    Loading,
    PasswordRequired {
        analysis_name: String,
        error: Option<String>,
    },
    Loaded(Box<Analysis>),
    Failed(String),
}

/// Public view of a shared analysis.
#[derive(Debug, Clone)]
pub struct SharedAnalysisScreen {
    pub id: i64,
    pub state: SharedState,
    pub password: String,
    pub submitting: bool,
    pub evaluation: EvaluationPanel,
}

impl SharedAnalysisScreen {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            state: SharedState::Loading,
            password: String::new(),
            submitting: false,
            evaluation: EvaluationPanel::default(),
        }
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.state {
            SharedState::Loaded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub async fn load(&mut self, api: &dyn ApiService) -> bool {
        self.state = SharedState::Loading;
        self.state = match api.shared_analysis(self.id).await {
            Ok(SharedAnalysisResponse::Granted { analysis, .. }) => SharedState::Loaded(analysis),
            Ok(SharedAnalysisResponse::PasswordRequired { analysis_name, .. }) => {
                SharedState::PasswordRequired {
                    analysis_name,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "Shared analysis unavailable");
                SharedState::Failed(e.user_message(LOAD_SHARED_FAILED))
            }
        };
        self.analysis().is_some()
    }

    /// Try the typed password. A rejection keeps the password prompt with an error.
    pub async fn submit_password(&mut self, api: &dyn ApiService) -> bool {
        let SharedState::PasswordRequired { analysis_name, .. } = &self.state else {
            return false;
        };
        let analysis_name = analysis_name.clone();

        self.submitting = true;
        let outcome = api.unlock_shared_analysis(self.id, &self.password).await;
        self.submitting = false;

        let error = match outcome {
            Ok(SharedAnalysisResponse::Granted { analysis, .. }) => {
                tracing::info!(id = self.id, "Shared analysis unlocked");
                self.password.clear();
                self.state = SharedState::Loaded(analysis);
                return true;
            }
            Ok(SharedAnalysisResponse::PasswordRequired { .. }) => ACCESS_DENIED.to_string(),
            Err(e) => e.user_message(ACCESS_DENIED),
        };
        self.state = SharedState::PasswordRequired {
            analysis_name,
            error: Some(error),
        };
        false
    }

    /// Evaluate the shared model. Only possible once the analysis is visible.
    pub async fn evaluate(&mut self, api: &dyn ApiService) -> bool {
        if self.analysis().is_none() {
            return false;
        }
        self.evaluation.evaluate(api, Some(self.id)).await
    }
}

/// Password prompt reached by a direct link.
///
/// On success the unlocked view is handed to the share page.
#[derive(Debug, Clone, Default)]
pub struct SharePasswordScreen {
    pub id: i64,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
    unlocked: Option<SharedAnalysisScreen>,
}

impl SharePasswordScreen {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Returns `Some(Route::Shared(id))` once the password is accepted.
    pub async fn submit(&mut self, api: &dyn ApiService) -> Option<Route> {
        let mut shared = SharedAnalysisScreen::new(self.id);
        shared.state = SharedState::PasswordRequired {
            analysis_name: String::new(),
            error: None,
        };
        shared.password = self.password.clone();

        self.submitting = true;
        self.error = None;
        let unlocked = shared.submit_password(api).await;
        self.submitting = false;

        if unlocked {
            self.password.clear();
            self.unlocked = Some(shared);
            return Some(Route::Shared(self.id));
        }
        if let SharedState::PasswordRequired { error, .. } = shared.state {
            self.error = error;
        }
        None
    }

    /// The share page with the analysis already visible.
    pub fn take_unlocked(&mut self) -> Option<SharedAnalysisScreen> {
        self.unlocked.take()
    }
}
