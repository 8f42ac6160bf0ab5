//! Authenticated HTTP client for the GoHighLevel API.
//!
//! All verb methods funnel through one dispatch routine that handles the
//! 401-refresh-retry cycle and error-message enrichment. A refresh replaces
//! the bearer token and the Authorization header as one step, so requests
//! issued after a refresh never observe a stale header.

use crate::error::{Error, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// API host, fixed for every deployment.
pub const BASE_URL: &str = "https://services.leadconnectorhq.com";
/// Pinned API version header value.
const API_VERSION: &str = "2021-07-28";
/// HTTP request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);
/// Raw-text fallback cap for error enrichment.
const ERROR_BODY_PREVIEW: usize = 200;

/// Authenticated GoHighLevel API client.
pub struct Client {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: String,
    api_key: String,
    location_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("location_id", &self.location_id)
            .finish()
    }
}

impl Client {
    /// Create a client with the given bearer token.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let headers = build_headers(&api_key)?;
        let http = reqwest::Client::builder().timeout(TIMEOUT).build()?;

        Ok(Self {
            http,
            headers,
            base_url: BASE_URL.to_string(),
            api_key,
            location_id: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
        })
    }

    /// Attach a default location id, read by endpoint functions.
    #[must_use]
    pub fn with_location_id(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Attach OAuth credentials. Automatic token renewal on 401 requires
    /// all three; partial credentials are stored but never used.
    #[must_use]
    pub fn with_oauth(
        mut self,
        client_id: Option<String>,
        client_secret: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        self.client_id = client_id;
        self.client_secret = client_secret;
        self.refresh_token = refresh_token;
        self
    }

    /// Point the client at a different host (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Current bearer token.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Default location id, if any.
    #[must_use]
    pub fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    /// Current refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Current Authorization header value.
    #[must_use]
    pub fn authorization_header(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }

    pub async fn get(&mut self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, params, None).await
    }

    pub async fn post(
        &mut self,
        path: &str,
        body: Option<&Value>,
        params: &[(&str, String)],
    ) -> Result<Value> {
        self.request(Method::POST, path, params, body).await
    }

    pub async fn put(
        &mut self,
        path: &str,
        body: Option<&Value>,
        params: &[(&str, String)],
    ) -> Result<Value> {
        self.request(Method::PUT, path, params, body).await
    }

    pub async fn delete(&mut self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        self.request(Method::DELETE, path, params, None).await
    }

    /// Dispatch a request, renewing the token on 401 when possible.
    ///
    /// A successful refresh re-issues the original request exactly once and
    /// that retry's outcome is final. A failed refresh is propagated without
    /// touching the original request again.
    async fn request(
        &mut self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.send(method.clone(), path, params, body).await?;
        let status = response.status();

        if status.is_success() {
            return decode_body(response).await;
        }

        if status == StatusCode::UNAUTHORIZED && self.has_oauth_credentials() {
            tracing::debug!(path, "got 401, refreshing access token");
            self.refresh_access_token().await?;

            let retry = self.send(method, path, params, body).await?;
            let retry_status = retry.status();
            if retry_status.is_success() {
                return decode_body(retry).await;
            }
            let text = retry.text().await.unwrap_or_default();
            return Err(status_error(retry_status, &text));
        }

        let text = response.text().await.unwrap_or_default();
        Err(status_error(status, &text))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url).headers(self.headers.clone());
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    fn has_oauth_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some() && self.refresh_token.is_some()
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Uses a separate transport without the bearer/version headers so a
    /// stale Authorization header never reaches the token endpoint. Stored
    /// credentials are only mutated after the response validates; the new
    /// token and the Authorization header move together.
    pub async fn refresh_access_token(&mut self) -> Result<Value> {
        let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
            self.client_id.clone(),
            self.client_secret.clone(),
            self.refresh_token.clone(),
        ) else {
            return Err(Error::Config(
                "client_id, client_secret, and refresh_token are required for token refresh".into(),
            ));
        };

        let token_client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        let response = token_client
            .post(format!("{}/oauth/token", self.base_url))
            .form(&[
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("user_type", "Location"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let mut message = format!("token endpoint returned {status}");
            if let Some(detail) = extract_error_detail(&text) {
                message.push_str(": ");
                message.push_str(&detail);
            }
            return Err(Error::Refresh(message));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::Refresh(format!("invalid token response: {e}")))?;
        let access_token = payload
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Refresh("token response is missing access_token".into()))?
            .to_string();

        self.set_access_token(&access_token)?;
        if let Some(rotated) = payload.get("refresh_token").and_then(Value::as_str) {
            self.refresh_token = Some(rotated.to_string());
        }
        tracing::debug!("access token refreshed");

        Ok(payload)
    }

    fn set_access_token(&mut self, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("access token contains invalid header characters".into()))?;
        self.api_key = token.to_string();
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
    headers.insert(AUTHORIZATION, value);
    headers.insert("Version", HeaderValue::from_static(API_VERSION));
    Ok(headers)
}

async fn decode_body(response: reqwest::Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Build an enriched status error from a response body.
fn status_error(status: StatusCode, body: &str) -> Error {
    let mut message = format!("HTTP {status}");
    if let Some(detail) = extract_error_detail(body) {
        message.push_str(" - ");
        message.push_str(&detail);
    }
    Error::Status { status, message }
}

/// Best-effort detail extraction from an error body. Never fails; a body
/// that resists extraction degrades to a raw-text preview or nothing.
fn extract_error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            for key in ["message", "error", "msg"] {
                if let Some(value) = map.get(key) {
                    return Some(render_detail(value));
                }
            }
            Some(Value::Object(map).to_string())
        }
        Ok(other) => Some(other.to_string()),
        Err(_) => {
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            if preview.is_empty() { None } else { Some(preview) }
        }
    }
}

/// Strings render bare; anything else renders as compact JSON.
fn render_detail(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}
