//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! Screens and the session only see `&dyn ApiService`; the concrete
//! [`ApiClient`](crate::services::api::ApiClient) adds cookies, CSRF and tracing.

use super::error::ApiResult;
use async_trait::async_trait;
use shared::{
    Analysis, AnalysisDetails, AnalysisUpdate, BulkDeleteResponse, ChangePasswordRequest,
    CurrentUserResponse, EvaluateRequest, EvaluateResponse, GeneratedSignal, GeneratorRequest,
    HomeSummary, LoginRequest, LoginResponse, MessageResponse, PasswordResetConfirmRequest,
    ProfileUpdate, RegisterRequest, RegisterResponse, SaveAnalysisResponse, ShareOptions,
    ShareUpdateRequest, ShareUpdateResponse, SharedAnalysisResponse, UploadRequest,
    UploadResponse, UserProfile,
};

/// One method per backend endpoint.
#[async_trait]
pub trait ApiService: Send + Sync {
    // ---- auth ----

    /// `POST /auth/login/`. A 401 here means wrong credentials, not an expired session.
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// `POST /auth/register/`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse>;

    /// `POST /auth/logout/`
    async fn logout(&self) -> ApiResult<MessageResponse>;

    /// `GET /auth/user/`
    async fn current_user(&self) -> ApiResult<CurrentUserResponse>;

    /// `GET /auth/verify-email/{uid}/{token}/`
    async fn verify_email(&self, uid: &str, token: &str) -> ApiResult<MessageResponse>;

    /// `POST /auth/change-password/`
    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<MessageResponse>;

    /// `POST /auth/password-reset/`
    async fn request_password_reset(&self, email: &str) -> ApiResult<MessageResponse>;

    /// `POST /auth/password-reset-confirm/`
    async fn confirm_password_reset(
        &self,
        request: &PasswordResetConfirmRequest,
    ) -> ApiResult<MessageResponse>;

    // ---- signal analysis ----

    /// `GET /home/`
    async fn home(&self) -> ApiResult<HomeSummary>;

    /// `POST /upload/` (multipart)
    async fn upload(&self, request: UploadRequest) -> ApiResult<UploadResponse>;

    /// `POST /evaluate/`
    async fn evaluate(&self, request: &EvaluateRequest) -> ApiResult<EvaluateResponse>;

    /// `GET /analyses/`
    async fn list_analyses(&self) -> ApiResult<Vec<Analysis>>;

    /// `GET /analyses/{id}/`
    async fn get_analysis(&self, id: i64) -> ApiResult<Analysis>;

    /// `PATCH /analyses/{id}/`
    async fn update_analysis(&self, id: i64, update: &AnalysisUpdate)
        -> ApiResult<Analysis>;

    /// `DELETE /analyses/{id}/`
    async fn delete_analysis(&self, id: i64) -> ApiResult<()>;

    /// `GET /analyses/{id}/details/`
    async fn analysis_details(&self, id: i64) -> ApiResult<AnalysisDetails>;

    /// `POST /analyses/bulk-delete/`
    async fn bulk_delete_analyses(&self, ids: &[i64]) -> ApiResult<BulkDeleteResponse>;

    /// `POST /save-analysis/`: persist the anonymous session analysis.
    async fn save_session_analysis(&self) -> ApiResult<SaveAnalysisResponse>;

    /// `POST /clear-session/`
    async fn clear_session(&self) -> ApiResult<MessageResponse>;

    // ---- sharing ----

    /// `GET /analyses/{id}/share-options/`
    async fn share_options(&self, id: i64) -> ApiResult<ShareOptions>;

    /// `POST /analyses/{id}/share-options/`
    async fn update_share_options(
        &self,
        id: i64,
        request: &ShareUpdateRequest,
    ) -> ApiResult<ShareUpdateResponse>;

    /// `GET /share/{id}/`
    async fn shared_analysis(&self, id: i64) -> ApiResult<SharedAnalysisResponse>;

    /// `POST /share/{id}/`. A 401 here means the share password was wrong.
    async fn unlock_shared_analysis(
        &self,
        id: i64,
        password: &str,
    ) -> ApiResult<SharedAnalysisResponse>;

    // ---- generator ----

    /// `POST /generator/`
    async fn generate_signal(&self, request: &GeneratorRequest)
        -> ApiResult<GeneratedSignal>;

    // ---- profile ----

    /// `GET /profile/`
    async fn profile(&self) -> ApiResult<UserProfile>;

    /// `PATCH /profile/` (multipart)
    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile>;
}
