//! Outcome of an upload: the fit, evaluate-at-x, and saving a temporary
//! analysis to the account.

use super::common::{EvaluationPanel, RenameDialog};
use crate::app::router::Route;
use crate::core::service::ApiService;
use shared::{Analysis, AnalysisResult, UploadResponse};

pub const SAVE_FAILED: &str = "Failed to save analysis";
pub const CLEAR_FAILED: &str = "Failed to clear analysis";

#[derive(Debug, Clone, Default)]
pub struct ResultsScreen {
    pub result: AnalysisResult,
    pub analysis: Option<Analysis>,
    /// True once the analysis belongs to the account
    pub saved: bool,
    pub evaluation: EvaluationPanel,
    pub rename: RenameDialog,
    pub saving: bool,
    pub error: Option<String>,
}

impl ResultsScreen {
    pub fn from_upload(response: UploadResponse) -> Self {
        Self {
            result: response.result,
            analysis: response.analysis,
            saved: response.saved,
            ..Default::default()
        }
    }

    pub fn function_string(&self) -> String {
        if !self.result.fitted_function.is_empty() {
            return self.result.fitted_function.clone();
        }
        self.result.parameters.function_string()
    }

    pub async fn evaluate(&mut self, api: &dyn ApiService) -> bool {
        let id = self.analysis.as_ref().map(|a| a.id);
        self.evaluation.evaluate(api, id).await
    }

    /// Move the session's temporary analysis into the account.
    ///
    /// Logged-out users get `Some(Route::Login)` back instead of a request.
    pub async fn save_to_account(
        &mut self,
        api: &dyn ApiService,
        authenticated: bool,
    ) -> Option<Route> {
        if !authenticated {
            return Some(Route::Login);
        }

        self.saving = true;
        self.error = None;
        let outcome = api.save_session_analysis().await;
        self.saving = false;

        match outcome {
            Ok(response) => {
                tracing::info!(id = response.analysis.id, "Session analysis saved");
                self.analysis = Some(response.analysis);
                self.saved = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saving session analysis failed");
                self.error = Some(SAVE_FAILED.to_string());
            }
        }
        None
    }

    /// Drop an unsaved analysis from the server session.
    ///
    /// Saved analyses are left alone and report false.
    pub async fn discard(&mut self, api: &dyn ApiService) -> bool {
        if self.saved {
            return false;
        }
        match api.clear_session().await {
            Ok(_) => {
                self.analysis = None;
                self.evaluation = EvaluationPanel::default();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clearing session analysis failed");
                self.error = Some(e.user_message(CLEAR_FAILED));
                false
            }
        }
    }

    pub fn start_rename(&mut self) {
        if let (true, Some(analysis)) = (self.saved, &self.analysis) {
            self.rename.open_for(analysis);
        }
    }

    /// Rename a saved analysis; the local copy becomes the server's response.
    pub async fn submit_rename(&mut self, api: &dyn ApiService) -> bool {
        let Some(id) = self.analysis.as_ref().filter(|_| self.saved).map(|a| a.id) else {
            return false;
        };
        match self.rename.submit(api, id).await {
            Some(analysis) => {
                self.analysis = Some(analysis);
                true
            }
            None => false,
        }
    }
}
