//! # Signal Generator Endpoint

use super::client::{ApiClient, AuthPolicy, Body};
use crate::core::error::ApiResult;
use reqwest::Method;
use shared::{GeneratedSignal, GeneratorRequest};

/// Generate a synthetic sinusoidal signal.
#[tracing::instrument(
    skip(client, request),
    fields(num_points = request.num_points, num_sinusoids = request.num_sinusoids, random = request.use_random_parameters)
)]
pub async fn generate_signal(client: &ApiClient, request: &GeneratorRequest) -> ApiResult<GeneratedSignal> {
    let start = std::time::Instant::now();
    let signal: GeneratedSignal = client
        .send(Method::POST, "/generator/", Body::json(request)?, AuthPolicy::Redirect)
        .await?;

    tracing::info!(
        samples = signal.csv_data.len(),
        plots = signal.plots.len(),
        duration_ms = start.elapsed().as_millis(),
        "Signal generated"
    );
    Ok(signal)
}
