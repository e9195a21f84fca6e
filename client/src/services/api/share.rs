//! # Share Endpoints
//!
//! Owner-side share settings and public, optionally password-gated, access.

use super::client::{ApiClient, AuthPolicy, Body};
use crate::core::error::ApiResult;
use reqwest::Method;
use shared::{
    SharePasswordRequest, ShareOptions, ShareUpdateRequest, ShareUpdateResponse,
    SharedAnalysisResponse,
};

#[tracing::instrument(skip(client))]
pub async fn share_options(client: &ApiClient, id: i64) -> ApiResult<ShareOptions> {
    client
        .send(
            Method::GET,
            &format!("/analyses/{id}/share-options/"),
            Body::Empty,
            AuthPolicy::Redirect,
        )
        .await
}

#[tracing::instrument(skip(client, request), fields(is_public = request.is_public, with_password = request.password.is_some()))]
pub async fn update_share_options(
    client: &ApiClient,
    id: i64,
    request: &ShareUpdateRequest,
) -> ApiResult<ShareUpdateResponse> {
    client
        .send(
            Method::POST,
            &format!("/analyses/{id}/share-options/"),
            Body::json(request)?,
            AuthPolicy::Redirect,
        )
        .await
}

/// Public view. Anonymous visitors are expected, so a 401 never redirects.
#[tracing::instrument(skip(client))]
pub async fn shared_analysis(client: &ApiClient, id: i64) -> ApiResult<SharedAnalysisResponse> {
    client
        .send(Method::GET, &format!("/share/{id}/"), Body::Empty, AuthPolicy::Credentials)
        .await
}

/// Submit the share password. A wrong password comes back as 401.
#[tracing::instrument(skip(client, password))]
pub async fn unlock_shared_analysis(
    client: &ApiClient,
    id: i64,
    password: &str,
) -> ApiResult<SharedAnalysisResponse> {
    let request = SharePasswordRequest {
        password: password.to_string(),
    };
    let result = client
        .send(
            Method::POST,
            &format!("/share/{id}/"),
            Body::json(&request)?,
            AuthPolicy::Credentials,
        )
        .await;

    if let Err(e) = &result {
        tracing::warn!(error = %e, "Shared analysis unlock failed");
    }
    result
}
