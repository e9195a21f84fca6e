//! # CSRF Double-Submit
//!
//! Django rejects unsafe requests unless the `X-CSRFToken` header matches the
//! `csrftoken` cookie. Before every POST/PUT/PATCH/DELETE the client:
//!
//! 1. issues `GET /csrf/`, which (re)sets the cookie and returns `{csrfToken}`
//! 2. reads the cookie back from the jar for the target URL
//! 3. attaches its value as the CSRF header
//!
//! A failed priming request is logged and the request goes out with whatever
//! cookie the jar already holds.

use super::client::ApiClient;
use reqwest::cookie::CookieStore;
use reqwest::{Method, Url};
use shared::CsrfResponse;

/// Methods that need a CSRF token.
pub fn requires_token(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Find `name` in a `Cookie` header value (`a=1; b=2`).
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

impl ApiClient {
    /// Current CSRF cookie value as it would be sent to `url`.
    pub fn csrf_cookie(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let header = header.to_str().ok()?;
        cookie_value(header, &self.config.csrf_cookie_name)
    }

    /// Prime the CSRF cookie and return the token to send with a request to `url`.
    ///
    /// The jar is authoritative; the token from the response body is only used
    /// when the backend did not set a cookie the jar would send to `url`.
    #[tracing::instrument(skip_all, fields(url = %url))]
    pub(crate) async fn csrf_token_for(&self, url: &Url) -> Option<String> {
        let body_token = match self.fetch_csrf().await {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch CSRF token");
                None
            }
        };

        let token = self.csrf_cookie(url).or(body_token);
        if token.is_none() {
            tracing::warn!("No CSRF token available, sending request without one");
        }
        token
    }

    async fn fetch_csrf(&self) -> Result<String, String> {
        let response = self
            .client
            .get(self.url("/csrf/"))
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("CSRF endpoint returned {}", status.as_u16()));
        }

        let body = response
            .json::<CsrfResponse>()
            .await
            .map_err(|e| format!("Failed to parse CSRF response: {e}"))?;

        tracing::debug!("CSRF cookie primed");
        Ok(body.csrf_token)
    }
}
