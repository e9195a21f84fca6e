//! # Signal Analysis Endpoints
//!
//! Home summary, CSV upload, function evaluation, and analysis CRUD.

use super::client::{ApiClient, AuthPolicy, Body};
use crate::core::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use shared::{
    Analysis, AnalysisDetails, AnalysisUpdate, BulkDeleteRequest, BulkDeleteResponse,
    EvaluateRequest, EvaluateResponse, HomeSummary, MessageResponse, SaveAnalysisResponse,
    UploadRequest, UploadResponse,
};

#[tracing::instrument(skip(client))]
pub async fn home(client: &ApiClient) -> ApiResult<HomeSummary> {
    client
        .send(Method::GET, "/home/", Body::Empty, AuthPolicy::Redirect)
        .await
}

/// Multipart form the upload endpoint expects.
pub(crate) fn upload_form(request: UploadRequest) -> ApiResult<Form> {
    let part = Part::bytes(request.contents)
        .file_name(request.file_name)
        .mime_str("text/csv")
        .map_err(|e| ApiError::Request(format!("Invalid upload content type: {e}")))?;

    let mut form = Form::new()
        .part("csv_file", part)
        .text("advanced_mode", request.advanced_mode.to_string())
        .text("noise_filter", request.noise_filter.to_string());

    if let Some(split_point) = request.split_point {
        form = form.text("split_point", split_point.to_string());
    }
    Ok(form)
}

/// Upload a CSV for fitting.
#[tracing::instrument(skip(client, request), fields(file = %request.file_name, bytes = request.contents.len()))]
pub async fn upload(client: &ApiClient, request: UploadRequest) -> ApiResult<UploadResponse> {
    tracing::info!(advanced_mode = request.advanced_mode, "Uploading CSV");
    let start = std::time::Instant::now();
    let form = upload_form(request)?;

    let result: ApiResult<UploadResponse> = client
        .send(Method::POST, "/upload/", Body::Multipart(form), AuthPolicy::Redirect)
        .await;

    if let Ok(response) = &result {
        tracing::info!(
            saved = response.saved,
            temp_analysis = response.temp_analysis,
            duration_ms = start.elapsed().as_millis(),
            "Upload analysed"
        );
    }
    result
}

#[tracing::instrument(skip(client, request), fields(points = request.x_values.len(), analysis_id = ?request.analysis_id))]
pub async fn evaluate(client: &ApiClient, request: &EvaluateRequest) -> ApiResult<EvaluateResponse> {
    client
        .send(Method::POST, "/evaluate/", Body::json(request)?, AuthPolicy::Redirect)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn list_analyses(client: &ApiClient) -> ApiResult<Vec<Analysis>> {
    let analyses: Vec<Analysis> = client
        .send(Method::GET, "/analyses/", Body::Empty, AuthPolicy::Redirect)
        .await?;
    tracing::debug!(count = analyses.len(), "Analyses loaded");
    Ok(analyses)
}

#[tracing::instrument(skip(client))]
pub async fn get_analysis(client: &ApiClient, id: i64) -> ApiResult<Analysis> {
    client
        .send(Method::GET, &format!("/analyses/{id}/"), Body::Empty, AuthPolicy::Redirect)
        .await
}

#[tracing::instrument(skip(client, update))]
pub async fn update_analysis(client: &ApiClient, id: i64, update: &AnalysisUpdate) -> ApiResult<Analysis> {
    client
        .send(
            Method::PATCH,
            &format!("/analyses/{id}/"),
            Body::json(update)?,
            AuthPolicy::Redirect,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_analysis(client: &ApiClient, id: i64) -> ApiResult<()> {
    client
        .send(Method::DELETE, &format!("/analyses/{id}/"), Body::Empty, AuthPolicy::Redirect)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn analysis_details(client: &ApiClient, id: i64) -> ApiResult<AnalysisDetails> {
    client
        .send(
            Method::GET,
            &format!("/analyses/{id}/details/"),
            Body::Empty,
            AuthPolicy::Redirect,
        )
        .await
}

#[tracing::instrument(skip(client, ids), fields(count = ids.len()))]
pub async fn bulk_delete_analyses(client: &ApiClient, ids: &[i64]) -> ApiResult<BulkDeleteResponse> {
    let request = BulkDeleteRequest {
        analysis_ids: ids.to_vec(),
    };
    client
        .send(
            Method::POST,
            "/analyses/bulk-delete/",
            Body::json(&request)?,
            AuthPolicy::Redirect,
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn save_session_analysis(client: &ApiClient) -> ApiResult<SaveAnalysisResponse> {
    client
        .send(Method::POST, "/save-analysis/", Body::Empty, AuthPolicy::Redirect)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn clear_session(client: &ApiClient) -> ApiResult<MessageResponse> {
    client
        .send(Method::POST, "/clear-session/", Body::Empty, AuthPolicy::Redirect)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_form_builds_with_optional_split() {
        let request = UploadRequest {
            file_name: "run.csv".into(),
            contents: b"x,y\n0,1\n".to_vec(),
            advanced_mode: true,
            noise_filter: 0.0,
            split_point: Some(0.8),
        };
        let form = upload_form(request).unwrap();
        assert!(form.boundary().len() > 0);
    }
}
