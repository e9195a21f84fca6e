//! Synthetic signal generator form and its results page.

use crate::core::service::ApiService;
use shared::{
    format_function_string, DataPoint, GeneratedSignal, GeneratorRequest, Sinusoid,
    MAX_SINUSOIDS,
};

pub const GENERATE_FAILED: &str = "Failed to generate signal";

/// Rows shown in the results preview table.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct GeneratorScreen {
    pub form: GeneratorRequest,
    pub loading: bool,
    pub error: Option<String>,
}

impl GeneratorScreen {
    pub fn set_sinusoid(&mut self, index: usize, sinusoid: Sinusoid) {
        if let Some(slot) = self.form.sinusoids.get_mut(index) {
            *slot = sinusoid;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let form = &self.form;
        if !(form.x_start.is_finite() && form.x_end.is_finite()) || form.x_end <= form.x_start {
            return Err("X end must be greater than X start".to_string());
        }
        if form.num_points == 0 {
            return Err("Number of points must be at least 1".to_string());
        }
        if form.num_sinusoids == 0 || form.num_sinusoids as usize > MAX_SINUSOIDS {
            return Err(format!("Number of sinusoids must be between 1 and {MAX_SINUSOIDS}"));
        }
        if form.add_noise && form.noise_level < 0.0 {
            return Err("Noise level must be zero or greater".to_string());
        }
        Ok(())
    }

    /// Generate a signal. The result is handed to [`GeneratorResultsScreen`].
    pub async fn submit(&mut self, api: &dyn ApiService) -> Option<GeneratorResultsScreen> {
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return None;
        }

        self.loading = true;
        self.error = None;
        let outcome = api.generate_signal(&self.form).await;
        self.loading = false;

        match outcome {
            Ok(signal) if signal.success => {
                tracing::info!(points = signal.csv_data.len(), "Signal generated");
                Some(GeneratorResultsScreen::new(signal))
            }
            Ok(signal) => {
                self.error = Some(signal.error.unwrap_or_else(|| "Generation failed".to_string()));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generator API error");
                self.error = Some(e.user_message(GENERATE_FAILED));
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorResultsScreen {
    pub signal: GeneratedSignal,
}

impl GeneratorResultsScreen {
    pub fn new(signal: GeneratedSignal) -> Self {
        Self { signal }
    }

    pub fn function_string(&self) -> String {
        if self.signal.function_string.is_empty() {
            let params = &self.signal.parameters;
            format_function_string(&params.sinusoids, params.offset)
        } else {
            self.signal.function_string.clone()
        }
    }

    pub fn preview(&self) -> &[DataPoint] {
        let rows = self.signal.csv_data.len().min(PREVIEW_ROWS);
        &self.signal.csv_data[..rows]
    }

    /// File name and contents for the CSV download.
    pub fn csv_download(&self) -> Option<(&'static str, String)> {
        if self.signal.csv_data.is_empty() {
            return None;
        }
        Some((GeneratedSignal::CSV_FILE_NAME, self.signal.to_csv()))
    }
}
