//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every call goes through [`ApiClient::send`], which:
//!
//! - resolves the path against the configured API root
//! - primes and attaches the CSRF token for unsafe methods (see [`super::csrf`])
//! - sends cookies from the shared jar (session + CSRF)
//! - decodes the body into the expected DTO, failing loudly on a shape mismatch
//! - turns non-2xx responses into [`ApiError`] and reports 401s on the event channel

use crate::app::events::AppEvent;
use crate::config::ClientConfig;
use crate::core::error::{ApiError, ApiResult, AppError, Result};
use crate::core::service::ApiService;
use async_channel::Sender;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Analysis, AnalysisDetails, AnalysisUpdate, BulkDeleteResponse, ChangePasswordRequest,
    CurrentUserResponse, EvaluateRequest, EvaluateResponse, GeneratedSignal, GeneratorRequest,
    HomeSummary, LoginRequest, LoginResponse, MessageResponse, PasswordResetConfirmRequest,
    ProfileUpdate, RegisterRequest, RegisterResponse, SaveAnalysisResponse, ShareOptions,
    ShareUpdateRequest, ShareUpdateResponse, SharedAnalysisResponse, UploadRequest,
    UploadResponse, UserProfile,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Request payload.
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

impl Body {
    pub(crate) fn json<B: Serialize + ?Sized>(body: &B) -> ApiResult<Self> {
        serde_json::to_value(body)
            .map(Body::Json)
            .map_err(|e| ApiError::Request(format!("Failed to encode request body: {e}")))
    }
}

/// What a 401 on this endpoint means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthPolicy {
    /// Session missing or expired: send the app to the login screen.
    Redirect,
    /// Submitted credentials were wrong: let the caller show the error.
    Credentials,
}

/// HTTP client for communicating with the backend API server.
///
/// Holds one cookie jar for the lifetime of the client, so the Django session
/// and CSRF cookies persist across calls.
pub struct ApiClient {
    pub(crate) client: Client,
    pub(crate) jar: Arc<Jar>,
    pub(crate) config: ClientConfig,
    events: Option<Sender<AppEvent>>,
}

impl ApiClient {
    /// Create a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.timeout_secs,
            "API client created"
        );

        Ok(Self {
            client,
            jar,
            config,
            events: None,
        })
    }

    /// Create a client from `SIGNAL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Report unauthorized responses on `tx`.
    pub fn with_events(mut self, tx: Sender<AppEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an API path such as `/auth/login/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// Send a request and decode the JSON response into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
        policy: AuthPolicy,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("api_request", %request_id, %method, path);
        self.dispatch(method, path, body, policy)
            .instrument(span)
            .await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
        policy: AuthPolicy,
    ) -> ApiResult<T> {
        let raw_url = self.url(path);
        let url = Url::parse(&raw_url)
            .map_err(|e| ApiError::Request(format!("Invalid URL {raw_url}: {e}")))?;

        let mut builder = self.client.request(method.clone(), url.clone());

        if super::csrf::requires_token(&method) {
            if let Some(token) = self.csrf_token_for(&url).await {
                builder = builder.header(self.config.csrf_header_name.as_str(), token);
            }
        }

        builder = match body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form),
        };

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "Network error");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "Failed to read response body");
            ApiError::Network(e.to_string())
        })?;
        let duration_ms = start.elapsed().as_millis();

        if status.is_success() {
            tracing::info!(status = status.as_u16(), duration_ms, "Request completed");
            return decode(&text);
        }

        let error = ApiError::from_response(status.as_u16(), &text);
        tracing::warn!(
            status = status.as_u16(),
            duration_ms,
            error = %error,
            "Request failed"
        );

        if error.is_unauthorized() && policy == AuthPolicy::Redirect {
            self.notify_unauthorized(path);
        }
        Err(error)
    }

    fn notify_unauthorized(&self, path: &str) {
        let Some(tx) = &self.events else {
            return;
        };
        if let Err(e) = tx.try_send(AppEvent::Unauthorized {
            path: path.to_string(),
        }) {
            tracing::warn!(error = %e, "Could not deliver unauthorized event");
        }
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    // 204 No Content and empty 200s decode as JSON null
    let raw = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!(error = %e, "Response parse error");
        ApiError::Decode(e.to_string())
    })
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        super::auth::login(self, request).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> ApiResult<RegisterResponse> {
        super::auth::register(self, request).await
    }

    async fn logout(&self) -> ApiResult<MessageResponse> {
        super::auth::logout(self).await
    }

    async fn current_user(&self) -> ApiResult<CurrentUserResponse> {
        super::auth::current_user(self).await
    }

    async fn verify_email(
        &self,
        uid: &str,
        token: &str,
    ) -> ApiResult<MessageResponse> {
        super::auth::verify_email(self, uid, token).await
    }

    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<MessageResponse> {
        super::auth::change_password(self, request).await
    }

    async fn request_password_reset(
        &self,
        email: &str,
    ) -> ApiResult<MessageResponse> {
        super::auth::request_password_reset(self, email).await
    }

    async fn confirm_password_reset(
        &self,
        request: &PasswordResetConfirmRequest,
    ) -> ApiResult<MessageResponse> {
        super::auth::confirm_password_reset(self, request).await
    }

    async fn home(&self) -> ApiResult<HomeSummary> {
        super::analysis::home(self).await
    }

    async fn upload(&self, request: UploadRequest) -> ApiResult<UploadResponse> {
        super::analysis::upload(self, request).await
    }

    async fn evaluate(
        &self,
        request: &EvaluateRequest,
    ) -> ApiResult<EvaluateResponse> {
        super::analysis::evaluate(self, request).await
    }

    async fn list_analyses(&self) -> ApiResult<Vec<Analysis>> {
        super::analysis::list_analyses(self).await
    }

    async fn get_analysis(&self, id: i64) -> ApiResult<Analysis> {
        super::analysis::get_analysis(self, id).await
    }

    async fn update_analysis(
        &self,
        id: i64,
        update: &AnalysisUpdate,
    ) -> ApiResult<Analysis> {
        super::analysis::update_analysis(self, id, update).await
    }

    async fn delete_analysis(&self, id: i64) -> ApiResult<()> {
        super::analysis::delete_analysis(self, id).await
    }

    async fn analysis_details(&self, id: i64) -> ApiResult<AnalysisDetails> {
        super::analysis::analysis_details(self, id).await
    }

    async fn bulk_delete_analyses(
        &self,
        ids: &[i64],
    ) -> ApiResult<BulkDeleteResponse> {
        super::analysis::bulk_delete_analyses(self, ids).await
    }

    async fn save_session_analysis(&self) -> ApiResult<SaveAnalysisResponse> {
        super::analysis::save_session_analysis(self).await
    }

    async fn clear_session(&self) -> ApiResult<MessageResponse> {
        super::analysis::clear_session(self).await
    }

    async fn share_options(&self, id: i64) -> ApiResult<ShareOptions> {
        super::share::share_options(self, id).await
    }

    async fn update_share_options(
        &self,
        id: i64,
        request: &ShareUpdateRequest,
    ) -> ApiResult<ShareUpdateResponse> {
        super::share::update_share_options(self, id, request).await
    }

    async fn shared_analysis(&self, id: i64) -> ApiResult<SharedAnalysisResponse> {
        super::share::shared_analysis(self, id).await
    }

    async fn unlock_shared_analysis(
        &self,
        id: i64,
        password: &str,
    ) -> ApiResult<SharedAnalysisResponse> {
        super::share::unlock_shared_analysis(self, id, password).await
    }

    async fn generate_signal(
        &self,
        request: &GeneratorRequest,
    ) -> ApiResult<GeneratedSignal> {
        super::generator::generate_signal(self, request).await
    }

    async fn profile(&self) -> ApiResult<UserProfile> {
        super::profile::profile(self).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile> {
        super::profile::update_profile(self, update).await
    }
}
