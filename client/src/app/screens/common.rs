//! Pieces shared by the analysis screens: the evaluate-at-x panel and the rename
//! dialog.

use crate::core::service::ApiService;
use shared::{parse_x_values, Analysis, AnalysisUpdate, EvaluateRequest, EvaluateResponse};

pub const EVALUATE_FAILED: &str = "Failed to evaluate function";
pub const INVALID_NUMBER: &str = "Please enter a valid number";
pub const RENAME_FAILED: &str = "Failed to rename analysis";

/// Evaluate the fitted function at a user-typed x value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationPanel {
    pub x_input: String,
    pub result: Option<EvaluateResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EvaluationPanel {
    /// First valid number of the comma-separated input.
    pub fn x_value(&self) -> Option<f64> {
        parse_x_values(&self.x_input).into_iter().next()
    }

    /// `(x, y)` of the last successful evaluation.
    pub fn point(&self) -> Option<(f64, f64)> {
        self.result.as_ref().and_then(EvaluateResponse::first)
    }

    /// Evaluate against the analysis `analysis_id` (or the session's temporary
    /// analysis when `None`). Returns true on success.
    ///
    /// Blank input is ignored without touching the panel.
    pub async fn evaluate(&mut self, api: &dyn ApiService, analysis_id: Option<i64>) -> bool {
        if self.x_input.trim().is_empty() {
            return false;
        }
        let Some(x) = self.x_value() else {
            self.error = Some(INVALID_NUMBER.to_string());
            self.result = None;
            return false;
        };

        self.loading = true;
        self.error = None;
        let request = EvaluateRequest {
            x_values: vec![x],
            analysis_id,
        };
        let outcome = api.evaluate(&request).await;
        self.loading = false;

        match outcome {
            Ok(response) => {
                self.result = Some(response);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, ?analysis_id, "Evaluation failed");
                self.result = None;
                self.error = Some(e.user_message(EVALUATE_FAILED));
                false
            }
        }
    }
}

/// Inline rename of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameDialog {
    pub open: bool,
    pub name: String,
    pub saving: bool,
    pub error: Option<String>,
}

impl RenameDialog {
    pub fn open_for(&mut self, analysis: &Analysis) {
        self.open = true;
        self.name = analysis.name.clone();
        self.error = None;
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Send the new name. A blank name is ignored without a request.
    ///
    /// On success the server's analysis is returned so the caller can replace
    /// its local copy wholesale.
    pub async fn submit(&mut self, api: &dyn ApiService, id: i64) -> Option<Analysis> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        self.saving = true;
        self.error = None;
        let update = AnalysisUpdate {
            name: Some(name.to_string()),
        };
        let outcome = api.update_analysis(id, &update).await;
        self.saving = false;

        match outcome {
            Ok(analysis) => {
                tracing::info!(id, name = %analysis.name, "Analysis renamed");
                self.open = false;
                Some(analysis)
            }
            Err(e) => {
                self.error = Some(e.user_message(RENAME_FAILED));
                None
            }
        }
    }
}
