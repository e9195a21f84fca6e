//! CSV upload form.

use super::results::ResultsScreen;
use crate::app::router::Route;
use crate::core::service::ApiService;
use shared::UploadRequest;

pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPLOAD_ERROR: &str = "Upload failed. Please try again.";

/// Largest file accepted before any request is made.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// File picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Where to go after an upload.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// Stored in the account: open its detail page
    Saved(Route),
    /// Anonymous upload kept in the server session
    Temporary(Box<ResultsScreen>),
}

#[derive(Debug, Clone, Default)]
pub struct UploadScreen {
    pub file: Option<SelectedFile>,
    pub advanced_mode: bool,
    pub split_point: String,
    pub noise_filter: f64,
    pub loading: bool,
    pub error: Option<String>,
}

impl UploadScreen {
    /// Accept a file if it looks like a CSV within the size limit.
    pub fn select_file(&mut self, name: &str, contents: Vec<u8>) -> bool {
        if !name.to_lowercase().ends_with(".csv") {
            self.error = Some("Please select a CSV file".to_string());
            return false;
        }
        if contents.len() > MAX_UPLOAD_BYTES {
            self.error = Some("File size must be less than 10MB".to_string());
            return false;
        }
        self.file = Some(SelectedFile {
            name: name.to_string(),
            contents,
        });
        self.error = None;
        true
    }

    pub fn clear_file(&mut self) {
        self.file = None;
        self.error = None;
    }

    /// Build the request, or the message explaining why not.
    pub fn request(&self) -> Result<UploadRequest, String> {
        let file = self.file.as_ref().ok_or("Please select a file")?;
        if !file.name.to_lowercase().ends_with(".csv") {
            return Err("Please select a CSV file".to_string());
        }
        if !self.noise_filter.is_finite() || self.noise_filter < 0.0 {
            return Err("Noise filter must be zero or greater".to_string());
        }

        let split_point = match self.split_point.trim() {
            raw if !self.advanced_mode || raw.is_empty() => None,
            raw => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or("Split point must be a number")?,
            ),
        };

        Ok(UploadRequest {
            file_name: file.name.clone(),
            contents: file.contents.clone(),
            advanced_mode: self.advanced_mode,
            noise_filter: self.noise_filter,
            split_point,
        })
    }

    pub async fn submit(&mut self, api: &dyn ApiService) -> Option<UploadOutcome> {
        let request = match self.request() {
            Ok(request) => request,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };

        self.loading = true;
        self.error = None;
        let outcome = api.upload(request).await;
        self.loading = false;

        match outcome {
            Ok(response) if response.success => {
                let saved_id = response
                    .analysis
                    .as_ref()
                    .filter(|_| response.saved)
                    .map(|a| a.id);
                match saved_id {
                    Some(id) => {
                        tracing::info!(id, "Upload saved");
                        Some(UploadOutcome::Saved(Route::AnalysisDetail(id)))
                    }
                    None => Some(UploadOutcome::Temporary(Box::new(
                        ResultsScreen::from_upload(response),
                    ))),
                }
            }
            Ok(response) => {
                self.error = Some(
                    response
                        .result
                        .error
                        .unwrap_or_else(|| UPLOAD_FAILED.to_string()),
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upload failed");
                self.error = Some(e.user_message(UPLOAD_ERROR));
                None
            }
        }
    }
}
