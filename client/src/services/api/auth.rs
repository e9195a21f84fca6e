//! # Authentication Endpoints
//!
//! Login, registration, logout, current user, email verification and the
//! password change/reset flows.

use super::client::{ApiClient, AuthPolicy, Body};
use crate::core::error::ApiResult;
use reqwest::Method;
use shared::{
    ChangePasswordRequest, CurrentUserResponse, LoginRequest, LoginResponse, MessageResponse,
    PasswordResetConfirmRequest, PasswordResetRequest, RegisterRequest, RegisterResponse,
};

/// Login with username and password.
///
/// A 401/400 here is a credential error and never triggers the login redirect.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> ApiResult<LoginResponse> {
    tracing::info!("Attempting login");

    let result: ApiResult<LoginResponse> = client
        .send(
            Method::POST,
            "/auth/login/",
            Body::json(request)?,
            AuthPolicy::Credentials,
        )
        .await;

    match &result {
        Ok(response) => tracing::info!(user_id = response.user.id, "Login successful"),
        Err(e) => tracing::warn!(error = %e, "Login failed"),
    }
    result
}

/// Register a new account. The account stays inactive until the emailed link is opened.
#[tracing::instrument(skip(client, request), fields(username = %request.username, email = %request.email))]
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
    tracing::info!("Attempting registration");
    client
        .send(
            Method::POST,
            "/auth/register/",
            Body::json(request)?,
            AuthPolicy::Credentials,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> ApiResult<MessageResponse> {
    client
        .send(Method::POST, "/auth/logout/", Body::Empty, AuthPolicy::Redirect)
        .await
}

/// Current session user; `is_authenticated: false` for anonymous sessions.
#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> ApiResult<CurrentUserResponse> {
    client
        .send(Method::GET, "/auth/user/", Body::Empty, AuthPolicy::Credentials)
        .await
}

#[tracing::instrument(skip(client, token))]
pub async fn verify_email(client: &ApiClient, uid: &str, token: &str) -> ApiResult<MessageResponse> {
    let path = format!("/auth/verify-email/{uid}/{token}/");
    client
        .send(Method::GET, &path, Body::Empty, AuthPolicy::Credentials)
        .await
}

#[tracing::instrument(skip(client, request))]
pub async fn change_password(
    client: &ApiClient,
    request: &ChangePasswordRequest,
) -> ApiResult<MessageResponse> {
    client
        .send(
            Method::POST,
            "/auth/change-password/",
            Body::json(request)?,
            AuthPolicy::Redirect,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn request_password_reset(client: &ApiClient, email: &str) -> ApiResult<MessageResponse> {
    let request = PasswordResetRequest {
        email: email.to_string(),
    };
    client
        .send(
            Method::POST,
            "/auth/password-reset/",
            Body::json(&request)?,
            AuthPolicy::Credentials,
        )
        .await
}

#[tracing::instrument(skip(client, request), fields(uid = %request.uid))]
pub async fn confirm_password_reset(
    client: &ApiClient,
    request: &PasswordResetConfirmRequest,
) -> ApiResult<MessageResponse> {
    client
        .send(
            Method::POST,
            "/auth/password-reset-confirm/",
            Body::json(request)?,
            AuthPolicy::Credentials,
        )
        .await
}
