//! # Analysis Detail
//!
//! One saved analysis: fitted function, parameters, evaluate-at-x, rename,
//! delete and the visualization payload.

use super::common::{EvaluationPanel, RenameDialog};
use crate::app::router::Route;
use crate::core::service::ApiService;
use shared::{download_file_name, Analysis, AnalysisDetails};

pub const LOAD_FAILED: &str = "Failed to load analysis";
pub const DELETE_FAILED: &str = "Failed to delete analysis";
pub const DETAILS_FAILED: &str = "Failed to load visualizations";

#[derive(Debug, Clone, Default)]
pub struct AnalysisDetailScreen {
    pub id: i64,
    pub analysis: Option<Analysis>,
    pub details: Option<AnalysisDetails>,
    pub evaluation: EvaluationPanel,
    pub rename: RenameDialog,
    pub confirm_delete: bool,
    pub deleting: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalysisDetailScreen {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub async fn load(&mut self, api: &dyn ApiService) -> bool {
        self.loading = true;
        self.error = None;
        let outcome = api.get_analysis(self.id).await;
        self.loading = false;

        match outcome {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                true
            }
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "Error loading analysis");
                self.analysis = None;
                self.error = Some(e.user_message(LOAD_FAILED));
                false
            }
        }
    }

    /// Fetch the plots and data preview.
    pub async fn load_details(&mut self, api: &dyn ApiService) -> bool {
        match api.analysis_details(self.id).await {
            Ok(details) => {
                self.details = Some(details);
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(DETAILS_FAILED));
                false
            }
        }
    }

    pub async fn evaluate(&mut self, api: &dyn ApiService) -> bool {
        let id = self.analysis.as_ref().map(|a| a.id);
        self.evaluation.evaluate(api, id).await
    }

    pub fn start_rename(&mut self) {
        if let Some(analysis) = &self.analysis {
            self.rename.open_for(analysis);
        }
    }

    /// Rename; on success the local analysis becomes the server's response.
    pub async fn submit_rename(&mut self, api: &dyn ApiService) -> bool {
        match self.rename.submit(api, self.id).await {
            Some(analysis) => {
                self.analysis = Some(analysis);
                true
            }
            None => false,
        }
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Delete after confirmation. Returns the route to show next.
    pub async fn confirm_delete(&mut self, api: &dyn ApiService) -> Option<Route> {
        if !self.confirm_delete {
            return None;
        }
        self.confirm_delete = false;
        self.deleting = true;
        let outcome = api.delete_analysis(self.id).await;
        self.deleting = false;

        match outcome {
            Ok(()) => {
                tracing::info!(id = self.id, "Analysis deleted");
                self.analysis = None;
                Some(Route::Analyses)
            }
            Err(e) => {
                self.error = Some(e.user_message(DELETE_FAILED));
                None
            }
        }
    }

    pub fn share_route(&self) -> Route {
        Route::ShareOptions(self.id)
    }

    pub fn download_name(&self) -> String {
        download_file_name(
            self.analysis
                .as_ref()
                .and_then(|a| a.uploaded_file.as_deref()),
        )
    }
}
