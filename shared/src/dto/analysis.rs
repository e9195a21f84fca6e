//! Signal analysis DTOs.
//!
//! An [`Analysis`] is created by a CSV upload (authenticated users) or by saving a
//! temporary session analysis, renamed via `PATCH /analyses/{id}/`, and deleted
//! individually or in bulk.

use super::decode::{json_or_encoded, null_as_default};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Plot keys produced by the fitting pipeline.
pub const PLOT_FREQUENCY_SPECTRUM: &str = "frequency_spectrum";
pub const PLOT_ORIGINAL_VS_RECONSTRUCTED: &str = "original_vs_reconstructed";
pub const PLOT_TRAINING_VS_TESTING: &str = "training_vs_testing";

/// One fitted `A * sin(2π f x + φ)` term.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SinusoidalComponent {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl SinusoidalComponent {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * x + self.phase).sin()
    }
}

/// Fitted model: a sum of sinusoids plus a constant offset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FitParameters {
    #[serde(default)]
    pub sinusoidal_components: Vec<SinusoidalComponent>,
    #[serde(default)]
    pub offset: f64,
}

impl FitParameters {
    /// Evaluate the model locally.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.sinusoidal_components
            .iter()
            .map(|c| c.evaluate(x))
            .sum::<f64>()
            + self.offset
    }

    /// Human-readable model, phases normalised to `[0, 2π)`.
    ///
    /// ```rust
    /// use shared::dto::analysis::{FitParameters, SinusoidalComponent};
    ///
    /// let params = FitParameters {
    ///     sinusoidal_components: vec![SinusoidalComponent { amplitude: 2.0, frequency: 0.25, phase: 0.5 }],
    ///     offset: 1.0,
    /// };
    /// assert_eq!(params.function_string(), "f(x) = 2.000 * sin(2π * 0.250 * x + 0.500) + 1.000");
    /// ```
    pub fn function_string(&self) -> String {
        let mut out = String::from("f(x) = ");
        for c in &self.sinusoidal_components {
            let phase = c.phase.rem_euclid(2.0 * PI);
            out.push_str(&format!(
                "{:.3} * sin(2π * {:.3} * x + {:.3}) + ",
                c.amplitude, c.frequency, phase
            ));
        }
        out.push_str(&format!("{:.3}", self.offset));
        out
    }
}

/// `(frequency, amplitude)` pair; `[f, a]` on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct DominantFrequency {
    pub frequency: f64,
    pub amplitude: f64,
}

impl From<(f64, f64)> for DominantFrequency {
    fn from((frequency, amplitude): (f64, f64)) -> Self {
        Self { frequency, amplitude }
    }
}

impl From<DominantFrequency> for (f64, f64) {
    fn from(value: DominantFrequency) -> Self {
        (value.frequency, value.amplitude)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// A plot image: inline base64 PNG or a URL to a stored file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PlotImage {
    Inline { mime: String, data: String },
    Url(String),
}

impl PlotImage {
    /// Decoded bytes of an inline image; `None` for URLs.
    pub fn inline_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        match self {
            PlotImage::Inline { data, .. } => Some(STANDARD.decode(data.as_bytes())),
            PlotImage::Url(_) => None,
        }
    }

    /// Value usable as an `<img src>`: a data URI or the URL itself.
    pub fn src(&self) -> String {
        match self {
            PlotImage::Inline { mime, data } => format!("data:{mime};base64,{data}"),
            PlotImage::Url(url) => url.clone(),
        }
    }
}

impl From<String> for PlotImage {
    fn from(raw: String) -> Self {
        if let Some(rest) = raw.strip_prefix("data:") {
            if let Some((header, data)) = rest.split_once(',') {
                let mime = header.trim_end_matches(";base64").to_string();
                return PlotImage::Inline {
                    mime,
                    data: data.to_string(),
                };
            }
        }
        if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with('/') {
            return PlotImage::Url(raw);
        }
        PlotImage::Inline {
            mime: "image/png".to_string(),
            data: raw,
        }
    }
}

impl From<PlotImage> for String {
    fn from(value: PlotImage) -> Self {
        match value {
            PlotImage::Inline { data, .. } => data,
            PlotImage::Url(url) => url,
        }
    }
}

/// Named plots as returned by the fitting and generator pipelines.
pub type Plots = BTreeMap<String, PlotImage>;

/// URLs of the plots stored with a saved analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisualizationUrls {
    #[serde(default)]
    pub original_signal: Option<String>,
    #[serde(default)]
    pub fitted_signal: Option<String>,
    #[serde(default)]
    pub frequency_analysis: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Saved,
    Shared,
}

/// A stored analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_file: Option<String>,
    #[serde(default)]
    pub fitted_function: String,
    #[serde(default, deserialize_with = "json_or_encoded")]
    pub parameters: FitParameters,
    #[serde(default)]
    pub mse: Option<f64>,
    #[serde(default, deserialize_with = "json_or_encoded")]
    pub dominant_frequencies: Vec<DominantFrequency>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_preview: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_signal_plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitted_signal_plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_analysis_plot: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visualization_urls: VisualizationUrls,
    #[serde(default)]
    pub has_visualizations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_analysis_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
}

impl Analysis {
    /// Name shown in lists and headers.
    pub fn title(&self) -> String {
        if !self.display_name.is_empty() {
            self.display_name.clone()
        } else if !self.name.is_empty() {
            self.name.clone()
        } else {
            format!("Analysis #{}", self.id)
        }
    }
}

/// Output of the fitting pipeline (`result` in the upload response).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub fitted_function: String,
    #[serde(default, deserialize_with = "json_or_encoded")]
    pub parameters: FitParameters,
    #[serde(default)]
    pub mse: Option<f64>,
    #[serde(default, deserialize_with = "json_or_encoded")]
    pub dominant_frequencies: Vec<DominantFrequency>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plots: Plots,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// CSV upload form, sent as multipart.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub advanced_mode: bool,
    pub noise_filter: f64,
    pub split_point: Option<f64>,
}

/// `POST /upload/`
///
/// Authenticated uploads are stored (`saved` with `analysis`); anonymous uploads
/// live in the server session only (`temp_analysis`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    pub result: AnalysisResult,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub temp_analysis: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluateRequest {
    pub x_values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluateResponse {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl EvaluateResponse {
    /// First `(x, y)` pair, which is what the evaluation panel shows.
    pub fn first(&self) -> Option<(f64, f64)> {
        Some((*self.x_values.first()?, *self.y_values.first()?))
    }
}

/// `PATCH /analyses/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkDeleteRequest {
    pub analysis_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub deleted_count: u32,
}

/// `POST /save-analysis/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveAnalysisResponse {
    #[serde(default)]
    pub success: bool,
    pub analysis: Analysis,
}

/// `GET /analyses/{id}/details/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDetails {
    pub analysis: Analysis,
    #[serde(default)]
    pub has_visualizations: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visualization_urls: VisualizationUrls,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_preview: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
}

/// `GET /home/`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HomeSummary {
    #[serde(default)]
    pub recent_analyses: Vec<Analysis>,
    #[serde(default)]
    pub total_analyses: u32,
    #[serde(default)]
    pub has_temp_analysis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_percent: Option<u32>,
}
