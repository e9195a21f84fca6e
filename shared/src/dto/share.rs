use super::analysis::Analysis;
use serde::{Deserialize, Serialize};

/// `GET /analyses/{id}/share-options/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareOptions {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub is_public: bool,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub public_url: String,
}

/// `POST /analyses/{id}/share-options/`
///
/// A password is only stored when `is_public` is set; sending none clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareUpdateRequest {
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub is_public: bool,
    #[serde(default)]
    pub has_password: bool,
    #[serde(default)]
    pub public_url: String,
}

/// `POST /share/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharePasswordRequest {
    pub password: String,
}

/// `GET /share/{id}/`: either the analysis or a password challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SharedAnalysisResponse {
    PasswordRequired {
        requires_password: bool,
        #[serde(default)]
        analysis_name: String,
    },
    Granted {
        analysis: Box<Analysis>,
        #[serde(default)]
        shared: bool,
    },
}
