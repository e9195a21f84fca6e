//! # Profile Endpoints

use super::client::{ApiClient, AuthPolicy, Body};
use crate::core::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use shared::{ProfileUpdate, UserProfile};

#[tracing::instrument(skip(client))]
pub async fn profile(client: &ApiClient) -> ApiResult<UserProfile> {
    client
        .send(Method::GET, "/profile/", Body::Empty, AuthPolicy::Redirect)
        .await
}

/// Multipart form with the non-empty text fields and the optional picture.
pub(crate) fn profile_form(update: ProfileUpdate) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in update.text_fields() {
        form = form.text(name, value);
    }

    if let Some(picture) = update.picture {
        let part = Part::bytes(picture.bytes)
            .file_name(picture.file_name)
            .mime_str(&picture.content_type)
            .map_err(|e| ApiError::Request(format!("Invalid picture content type: {e}")))?;
        form = form.part("profile_picture", part);
    }
    Ok(form)
}

#[tracing::instrument(skip(client, update), fields(with_picture = update.picture.is_some()))]
pub async fn update_profile(client: &ApiClient, update: ProfileUpdate) -> ApiResult<UserProfile> {
    let form = profile_form(update)?;
    client
        .send(Method::PATCH, "/profile/", Body::Multipart(form), AuthPolicy::Redirect)
        .await
}
