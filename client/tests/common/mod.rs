//! # Mock Backend
//!
//! In-process axum server that mimics the Django API closely enough to drive
//! the real `ApiClient`: session cookie auth, CSRF double-submit checks, seeded
//! analyses (one with JSON-encoded parameters) and the share password flow.

#![allow(dead_code)]

use async_channel::{unbounded, Receiver};
use axum::extract::{Multipart, Path, Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared::{format_function_string, Analysis, Sinusoid};
use signal_client::app::AppEvent;
use signal_client::config::ClientConfig;
use signal_client::services::ApiClient;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "s3cret-pass";
pub const SHARE_PASSWORD: &str = "open-sesame";

/// Shared public analysis without a password
pub const PUBLIC_ID: i64 = 3;
/// Shared public analysis behind [`SHARE_PASSWORD`]
pub const PROTECTED_ID: i64 = 4;
/// Id given to anonymous uploads
pub const TEMP_ID: i64 = 900;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub csrf_header: Option<String>,
    pub csrf_cookie: Option<String>,
}

#[derive(Default)]
struct Inner {
    csrf_issued: u64,
    sessions: HashSet<String>,
    session_counter: u64,
    analyses: Vec<Value>,
    next_id: i64,
    passwords: HashMap<i64, String>,
    temp_analysis: Option<Value>,
    profile: Value,
    requests: Vec<RecordedRequest>,
    csrf_failures: Vec<String>,
    last_generator_body: Option<Value>,
    last_upload_fields: Vec<String>,
    last_profile_fields: Vec<String>,
}

#[derive(Default)]
pub struct MockState {
    inner: Mutex<Inner>,
    logout_fails: AtomicBool,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        seed(&state);

        let app = Router::new()
            .route("/api/csrf/", get(csrf))
            .route("/api/auth/login/", post(login))
            .route("/api/auth/register/", post(register))
            .route("/api/auth/logout/", post(logout))
            .route("/api/auth/user/", get(current_user))
            .route("/api/auth/verify-email/{uid}/{token}/", get(verify_email))
            .route("/api/auth/change-password/", post(change_password))
            .route("/api/auth/password-reset/", post(password_reset))
            .route("/api/auth/password-reset-confirm/", post(password_reset_confirm))
            .route("/api/home/", get(home))
            .route("/api/upload/", post(upload))
            .route("/api/evaluate/", post(evaluate))
            .route("/api/analyses/", get(list_analyses))
            .route("/api/analyses/bulk-delete/", post(bulk_delete))
            .route(
                "/api/analyses/{id}/",
                get(get_analysis).patch(update_analysis).delete(delete_analysis),
            )
            .route("/api/analyses/{id}/details/", get(analysis_details))
            .route(
                "/api/analyses/{id}/share-options/",
                get(share_options).post(update_share_options),
            )
            .route("/api/share/{id}/", get(shared_analysis).post(unlock_shared))
            .route("/api/save-analysis/", post(save_analysis))
            .route("/api/clear-session/", post(clear_session))
            .route("/api/generator/", post(generator))
            .route("/api/profile/", get(profile).patch(update_profile))
            .layer(middleware::from_fn_with_state(Arc::clone(&state), csrf_guard))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Binding the mock backend should succeed in test");
        let addr = listener
            .local_addr()
            .expect("Mock backend should have an address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend should keep serving");
        });

        Self { addr, state }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(self.api_url())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config()).expect("Client should build in test")
    }

    /// Client reporting unauthorized responses on the returned receiver.
    pub fn client_with_events(&self) -> (ApiClient, Receiver<AppEvent>) {
        let (tx, rx) = unbounded();
        (self.client().with_events(tx), rx)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().requests.clone()
    }

    pub fn csrf_failures(&self) -> Vec<String> {
        self.state.inner.lock().csrf_failures.clone()
    }

    pub fn set_logout_fails(&self, fails: bool) {
        self.state.logout_fails.store(fails, Ordering::SeqCst);
    }

    /// Invalidate every server session; clients keep their stale cookie.
    pub fn expire_sessions(&self) {
        self.state.inner.lock().sessions.clear();
    }

    pub fn analysis_ids(&self) -> Vec<i64> {
        self.state
            .inner
            .lock()
            .analyses
            .iter()
            .filter_map(|a| a["id"].as_i64())
            .collect()
    }

    pub fn last_generator_body(&self) -> Option<Value> {
        self.state.inner.lock().last_generator_body.clone()
    }

    pub fn last_upload_fields(&self) -> Vec<String> {
        self.state.inner.lock().last_upload_fields.clone()
    }

    pub fn last_profile_fields(&self) -> Vec<String> {
        self.state.inner.lock().last_profile_fields.clone()
    }
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "email": "alice@example.com",
        "first_name": "Alice",
        "last_name": "Liddell",
        "date_joined": "2024-01-01T00:00:00Z"
    })
}

fn seed(state: &MockState) {
    let mut inner = state.inner.lock();
    inner.analyses = vec![
        json!({
            "id": 1,
            "name": "Sensor A",
            "display_name": "Sensor A",
            "created_at": "2024-05-01T12:00:00Z",
            "uploaded_file": "/media/uploads/sensor_a.csv",
            "fitted_function": "f(x) = 1.000 * sin(2π * 0.100 * x + 0.000) + 0.500",
            "parameters": {
                "sinusoidal_components": [{ "amplitude": 1.0, "frequency": 0.1, "phase": 0.0 }],
                "offset": 0.5
            },
            "mse": 0.012,
            "dominant_frequencies": [[0.1, 1.0]],
            "is_public": false,
            "has_password": false
        }),
        json!({
            "id": 2,
            "name": "Sensor B",
            "display_name": "Sensor B",
            "parameters": "{\"sinusoidal_components\": [{\"amplitude\": 2.0, \"frequency\": 0.25, \"phase\": 0.5}], \"offset\": 0.5}",
            "dominant_frequencies": "[[0.25, 2.0]]",
            "mse": null,
            "is_public": false,
            "has_password": false
        }),
        json!({
            "id": PUBLIC_ID,
            "name": "Tide gauge",
            "display_name": "Tide gauge",
            "parameters": {
                "sinusoidal_components": [{ "amplitude": 3.0, "frequency": 0.05, "phase": 0.0 }],
                "offset": 1.0
            },
            "is_public": true,
            "has_password": false
        }),
        json!({
            "id": PROTECTED_ID,
            "name": "Secret vibration",
            "display_name": "Secret vibration",
            "parameters": {
                "sinusoidal_components": [{ "amplitude": 0.5, "frequency": 1.0, "phase": 0.0 }],
                "offset": 0.0
            },
            "is_public": true,
            "has_password": true
        }),
    ];
    inner.next_id = 10;
    inner.passwords.insert(PROTECTED_ID, SHARE_PASSWORD.to_string());
    inner.profile = json!({
        "user": user_json(),
        "profile_picture": null,
        "bio": "Signals and systems",
        "location": "Oxford",
        "birth_date": null,
        "website": null
    });
}

// ---- helpers ----

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn ok(body: Value) -> Response {
    reply(StatusCode::OK, body)
}

fn unauthorized() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Authentication credentials were not provided." }),
    )
}

fn not_found() -> Response {
    reply(StatusCode::NOT_FOUND, json!({ "error": "Analysis not found" }))
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

impl MockState {
    fn authed(&self, headers: &HeaderMap) -> bool {
        cookie(headers, "sessionid").is_some_and(|sid| self.inner.lock().sessions.contains(&sid))
    }
}

fn share_payload(analysis: &Value) -> Value {
    json!({ "analysis": analysis, "shared": true })
}

fn evaluate_at(analysis: &Value, x: f64) -> f64 {
    serde_json::from_value::<Analysis>(analysis.clone())
        .map(|a| a.parameters.evaluate(x))
        .unwrap_or(f64::NAN)
}

// ---- middleware ----

/// Record every request; reject unsafe ones whose CSRF header doesn't match the cookie.
async fn csrf_guard(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let csrf_header = request
        .headers()
        .get("X-CSRFToken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let csrf_cookie = cookie(request.headers(), "csrftoken");

    let unsafe_method = matches!(
        method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    let rejected = unsafe_method && (csrf_header.is_none() || csrf_header != csrf_cookie);

    {
        let mut inner = state.inner.lock();
        inner.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            csrf_header,
            csrf_cookie,
        });
        if rejected {
            inner.csrf_failures.push(path);
        }
    }

    if rejected {
        return reply(
            StatusCode::FORBIDDEN,
            json!({ "detail": "CSRF Failed: CSRF token missing or incorrect." }),
        );
    }
    next.run(request).await
}

// ---- auth ----

async fn csrf(State(state): State<Arc<MockState>>) -> Response {
    let token = {
        let mut inner = state.inner.lock();
        inner.csrf_issued += 1;
        format!("csrf-token-{}", inner.csrf_issued)
    };
    (
        [(header::SET_COOKIE, format!("csrftoken={token}; Path=/"))],
        Json(json!({ "csrfToken": token })),
    )
        .into_response()
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body["username"] != USERNAME || body["password"] != PASSWORD {
        return reply(StatusCode::UNAUTHORIZED, json!({ "error": "Invalid credentials" }));
    }
    let sid = {
        let mut inner = state.inner.lock();
        inner.session_counter += 1;
        let sid = format!("sess-{}", inner.session_counter);
        inner.sessions.insert(sid.clone());
        sid
    };
    (
        [(header::SET_COOKIE, format!("sessionid={sid}; Path=/; HttpOnly"))],
        Json(json!({ "user": user_json(), "message": "Login successful" })),
    )
        .into_response()
}

/// Django's minimum length validator message.
pub const PASSWORD_TOO_SHORT: &str =
    "This password is too short. It must contain at least 8 characters.";

fn too_short(password: &Value) -> bool {
    password.as_str().is_some_and(|p| p.chars().count() < 8)
}

async fn register(Json(body): Json<Value>) -> Response {
    if too_short(&body["password"]) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "errors": { "password": [PASSWORD_TOO_SHORT] } }),
        );
    }
    if body["username"] == "taken" {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({
                "success": false,
                "errors": {
                    "username": ["A user with that username already exists."],
                    "password": ["This password is too common."]
                }
            }),
        );
    }
    reply(
        StatusCode::CREATED,
        json!({
            "success": true,
            "message": "Registration successful. Please check your email to verify your account."
        }),
    )
}

async fn logout(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if state.logout_fails.load(Ordering::SeqCst) {
        return reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Logout failed" }));
    }
    if let Some(sid) = cookie(&headers, "sessionid") {
        state.inner.lock().sessions.remove(&sid);
    }
    (
        [(header::SET_COOKIE, "sessionid=; Max-Age=0; Path=/".to_string())],
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

async fn current_user(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if state.authed(&headers) {
        ok(json!({ "is_authenticated": true, "user": user_json() }))
    } else {
        ok(json!({ "is_authenticated": false }))
    }
}

async fn verify_email(Path((_uid, token)): Path<(String, String)>) -> Response {
    if token == "good" {
        ok(json!({ "success": true, "message": "Email verified successfully." }))
    } else {
        reply(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "error": "Invalid verification link" }),
        )
    }
}

async fn change_password(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    if body["current_password"] != PASSWORD {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "current_password": ["Current password is incorrect."] }),
        );
    }
    ok(json!({ "message": "Password changed successfully" }))
}

async fn password_reset(Json(_body): Json<Value>) -> Response {
    ok(json!({ "message": "If the email exists, a reset link has been sent." }))
}

async fn password_reset_confirm(Json(body): Json<Value>) -> Response {
    if too_short(&body["new_password"]) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "new_password": [PASSWORD_TOO_SHORT] }),
        );
    }
    if body["token"] != "good" {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "token": ["Invalid or expired token."] }),
        );
    }
    ok(json!({ "message": "Password has been reset." }))
}

// ---- signal analysis ----

async fn home(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    let authed = state.authed(&headers);
    let inner = state.inner.lock();
    if !authed {
        return ok(json!({
            "recent_analyses": [],
            "total_analyses": 0,
            "has_temp_analysis": inner.temp_analysis.is_some()
        }));
    }
    let recent: Vec<Value> = inner.analyses.iter().take(5).cloned().collect();
    ok(json!({
        "recent_analyses": recent,
        "total_analyses": inner.analyses.len(),
        "has_temp_analysis": inner.temp_analysis.is_some(),
        "quota_total": 50
    }))
}

async fn upload(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut fields = Vec::new();
    let mut file_name = None;
    let mut contents = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "csv_file" {
            file_name = field.file_name().map(str::to_string);
        }
        let bytes = field.bytes().await.unwrap_or_default();
        if name == "csv_file" {
            contents = bytes.to_vec();
        }
        fields.push(name);
    }

    let authed = state.authed(&headers);
    let mut inner = state.inner.lock();
    inner.last_upload_fields = fields;

    let Some(file_name) = file_name.filter(|_| !contents.is_empty()) else {
        return reply(StatusCode::BAD_REQUEST, json!({ "error": "No CSV data found" }));
    };

    let id = if authed {
        inner.next_id += 1;
        inner.next_id
    } else {
        TEMP_ID
    };
    let analysis = json!({
        "id": id,
        "name": file_name.trim_end_matches(".csv"),
        "uploaded_file": format!("/media/uploads/{file_name}"),
        "parameters": {
            "sinusoidal_components": [{ "amplitude": 1.5, "frequency": 0.2, "phase": 0.0 }],
            "offset": 0.0
        }
    });
    let result = json!({
        "success": true,
        "fitted_function": "f(x) = 1.500 * sin(2π * 0.200 * x + 0.000) + 0.000",
        "parameters": analysis["parameters"],
        "mse": 0.02,
        "dominant_frequencies": [[0.2, 1.5]],
        "plots": { "original_signal": "iVBORw0KGgo=" }
    });

    if authed {
        inner.analyses.insert(0, analysis.clone());
    } else {
        inner.temp_analysis = Some(analysis.clone());
    }
    ok(json!({
        "success": true,
        "analysis": analysis,
        "result": result,
        "saved": authed,
        "temp_analysis": !authed
    }))
}

async fn evaluate(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let x_values: Vec<f64> = body["x_values"]
        .as_array()
        .map(|xs| xs.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();
    if x_values.is_empty() {
        return reply(StatusCode::BAD_REQUEST, json!({ "error": "No x values provided" }));
    }

    let inner = state.inner.lock();
    let analysis = match body["analysis_id"].as_i64() {
        Some(id) => inner
            .analyses
            .iter()
            .chain(inner.temp_analysis.iter())
            .find(|a| a["id"] == id)
            .cloned(),
        None => inner.temp_analysis.clone(),
    };
    let Some(analysis) = analysis else {
        return not_found();
    };

    let y_values: Vec<f64> = x_values.iter().map(|x| evaluate_at(&analysis, *x)).collect();
    ok(json!({ "x_values": x_values, "y_values": y_values }))
}

async fn list_analyses(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    ok(Value::Array(state.inner.lock().analyses.clone()))
}

async fn get_analysis(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let inner = state.inner.lock();
    match inner.analyses.iter().find(|a| a["id"] == id) {
        Some(analysis) => ok(analysis.clone()),
        None => not_found(),
    }
}

async fn update_analysis(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let name = body["name"].as_str().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "name": ["This field may not be blank."] }),
        );
    }

    let mut inner = state.inner.lock();
    let Some(analysis) = inner.analyses.iter_mut().find(|a| a["id"] == id) else {
        return not_found();
    };
    analysis["name"] = json!(name);
    analysis["display_name"] = json!(format!("{name} (renamed)"));
    analysis["mse"] = json!(0.5);
    ok(analysis.clone())
}

async fn delete_analysis(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock();
    let before = inner.analyses.len();
    inner.analyses.retain(|a| a["id"] != id);
    if inner.analyses.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn analysis_details(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let inner = state.inner.lock();
    let Some(analysis) = inner.analyses.iter().find(|a| a["id"] == id) else {
        return not_found();
    };
    ok(json!({
        "analysis": analysis,
        "has_visualizations": true,
        "visualization_urls": {
            "original_signal": format!("/media/plots/{id}_original.png"),
            "fitted_signal": format!("/media/plots/{id}_fitted.png")
        },
        "data_preview": [{ "x": 0.0, "y": 0.5 }, { "x": 1.0, "y": 1.1 }],
        "display_mode": "saved"
    }))
}

async fn bulk_delete(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let ids: Vec<i64> = body["analysis_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();

    let mut inner = state.inner.lock();
    let before = inner.analyses.len();
    inner
        .analyses
        .retain(|a| !a["id"].as_i64().is_some_and(|id| ids.contains(&id)));
    let deleted = before - inner.analyses.len();
    ok(json!({ "success": true, "deleted_count": deleted }))
}

async fn save_analysis(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock();
    let Some(mut analysis) = inner.temp_analysis.take() else {
        return reply(StatusCode::BAD_REQUEST, json!({ "error": "No analysis in session" }));
    };
    inner.next_id += 1;
    analysis["id"] = json!(inner.next_id);
    inner.analyses.insert(0, analysis.clone());
    ok(json!({ "success": true, "analysis": analysis }))
}

async fn clear_session(State(state): State<Arc<MockState>>) -> Response {
    state.inner.lock().temp_analysis = None;
    ok(json!({ "success": true, "message": "Session cleared" }))
}

// ---- sharing ----

fn public_url(id: i64) -> String {
    format!("http://localhost:3000/share/{id}")
}

async fn share_options(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let inner = state.inner.lock();
    let Some(analysis) = inner.analyses.iter().find(|a| a["id"] == id) else {
        return not_found();
    };
    ok(json!({
        "id": id,
        "name": analysis["name"],
        "is_public": analysis["is_public"],
        "has_password": analysis["has_password"],
        "public_url": public_url(id)
    }))
}

async fn update_share_options(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let is_public = body["is_public"].as_bool().unwrap_or(false);
    let password = body["password"].as_str().map(str::to_string);

    let mut inner = state.inner.lock();
    if !inner.analyses.iter().any(|a| a["id"] == id) {
        return not_found();
    }
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        inner.passwords.insert(id, password);
    }
    let has_password = inner.passwords.contains_key(&id);
    if let Some(analysis) = inner.analyses.iter_mut().find(|a| a["id"] == id) {
        analysis["is_public"] = json!(is_public);
        analysis["has_password"] = json!(has_password);
    }
    ok(json!({
        "success": true,
        "message": "Share settings updated",
        "is_public": is_public,
        "has_password": has_password,
        "public_url": public_url(id)
    }))
}

async fn shared_analysis(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    let inner = state.inner.lock();
    let Some(analysis) = inner
        .analyses
        .iter()
        .find(|a| a["id"] == id && a["is_public"] == true)
    else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "error": "This analysis is not publicly shared" }),
        );
    };
    if inner.passwords.contains_key(&id) {
        return ok(json!({ "requires_password": true, "analysis_name": analysis["name"] }));
    }
    ok(share_payload(analysis))
}

async fn unlock_shared(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let inner = state.inner.lock();
    let Some(analysis) = inner
        .analyses
        .iter()
        .find(|a| a["id"] == id && a["is_public"] == true)
    else {
        return not_found();
    };
    match inner.passwords.get(&id) {
        Some(expected) if body["password"].as_str() == Some(expected.as_str()) => {
            ok(share_payload(analysis))
        }
        Some(_) => reply(StatusCode::UNAUTHORIZED, json!({ "error": "Incorrect password" })),
        None => ok(share_payload(analysis)),
    }
}

// ---- generator ----

async fn generator(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.inner.lock().last_generator_body = Some(body.clone());

    let count = body["num_sinusoids"].as_u64().unwrap_or(0).min(3);
    let sinusoids: Vec<Sinusoid> = (1..=count)
        .map(|n| {
            Sinusoid(
                body[format!("amplitude_{n}")].as_f64().unwrap_or(0.0),
                body[format!("frequency_{n}")].as_f64().unwrap_or(0.0),
                body[format!("phase_{n}")].as_f64().unwrap_or(0.0),
            )
        })
        .collect();
    let offset = body["offset"].as_f64().unwrap_or(0.0);
    let x_start = body["x_start"].as_f64().unwrap_or(0.0);
    let x_end = body["x_end"].as_f64().unwrap_or(1.0);
    let num_points = body["num_points"].as_u64().unwrap_or(0).min(20);

    let step = if num_points > 1 {
        (x_end - x_start) / (num_points - 1) as f64
    } else {
        0.0
    };
    let csv_data: Vec<Value> = (0..num_points)
        .map(|i| {
            let x = x_start + step * i as f64;
            let y: f64 = sinusoids
                .iter()
                .map(|s| s.0 * (2.0 * std::f64::consts::PI * s.1 * x + s.2).sin())
                .sum::<f64>()
                + offset;
            json!({ "x": x, "y": y })
        })
        .collect();

    ok(json!({
        "success": true,
        "function_string": format_function_string(&sinusoids, offset),
        "parameters": {
            "sinusoids": sinusoids,
            "offset": offset,
            "noise_level": body["noise_level"],
            "x_range": [x_start, x_end],
            "num_points": num_points
        },
        "plots": { "signal": "data:image/png;base64,iVBORw0KGgo=" },
        "csv_data": csv_data
    }))
}

// ---- profile ----

async fn profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }
    let inner = state.inner.lock();
    let mut profile = inner.profile.clone();
    profile["total_analyses"] = json!(inner.analyses.len());
    profile["quota_total"] = json!(50);
    ok(profile)
}

async fn update_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !state.authed(&headers) {
        return unauthorized();
    }

    let mut updates = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let text = match file_name {
            Some(file_name) => {
                let _ = field.bytes().await;
                format!("/media/profile_pics/{file_name}")
            }
            None => field.text().await.unwrap_or_default(),
        };
        updates.push((name, text));
    }

    if let Some((_, website)) = updates.iter().find(|(name, _)| name == "website") {
        if !website.starts_with("http") {
            return reply(StatusCode::BAD_REQUEST, json!({ "website": ["Enter a valid URL."] }));
        }
    }

    let mut inner = state.inner.lock();
    inner.last_profile_fields = updates.iter().map(|(name, _)| name.clone()).collect();
    for (name, value) in updates {
        match name.as_str() {
            "first_name" | "last_name" | "email" => inner.profile["user"][name.as_str()] = json!(value),
            _ => inner.profile[name.as_str()] = json!(value),
        }
    }
    ok(inner.profile.clone())
}
