//! The single HTTP primitive every endpoint goes through.
//!
//! Responsibilities:
//! - Join a path onto the base URL and attach the session's authorization header.
//! - Default `output_mode=json` unless the caller supplied an output mode.
//! - Map non-2xx statuses to `ClientError::ApiError` and normalize 2xx bodies.
//!
//! Does NOT handle:
//! - Retries. Failures are returned to the caller as-is.
//! - Deciding which credential to use (see `auth`).

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::normalize::normalize_body;

/// One REST call against the management port.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub params: Vec<(&'a str, String)>,
    pub form: Option<Vec<(&'a str, String)>>,
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            params: Vec::new(),
            form: None,
            timeout: None,
        }
    }

    pub fn get(path: &'a str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: &'a str) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post_form(path: &'a str, form: Vec<(&'a str, String)>) -> Self {
        Self {
            form: Some(form),
            ..Self::new(Method::POST, path)
        }
    }

    pub fn param(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn has_output_mode(&self) -> bool {
        let in_params = self.params.iter().any(|(k, _)| *k == "output_mode");
        let in_form = self
            .form
            .as_ref()
            .is_some_and(|f| f.iter().any(|(k, _)| *k == "output_mode"));
        in_params || in_form
    }
}

/// Send `request` and return the normalized body.
///
/// # Errors
///
/// - `ClientError::ApiError` for any non-2xx status, carrying the response text.
/// - `ClientError::Http` for transport failures (connect, TLS, timeout).
/// - `ClientError::InvalidResponse` when a JSON/XML body cannot be decoded.
pub async fn send_request(
    client: &Client,
    base_url: &str,
    authorization: Option<&HeaderValue>,
    request: ApiRequest<'_>,
) -> Result<Value> {
    let url = format!("{}{}", base_url, request.path);
    debug!(method = %request.method, path = request.path, "Sending Splunk request");

    let mut params = request.params.clone();
    if !request.has_output_mode() {
        params.push(("output_mode", "json".to_string()));
    }

    let mut builder = client.request(request.method.clone(), &url).query(&params);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value.clone());
    }
    if let Some(form) = &request.form {
        builder = builder.form(form);
    }
    if let Some(timeout) = request.timeout {
        builder = builder.timeout(timeout);
    }

    let response = builder.send().await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await?;

    if !status.is_success() {
        debug!(status = status.as_u16(), path = request.path, "Splunk request failed");
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    normalize_body(&content_type, &body)
}
