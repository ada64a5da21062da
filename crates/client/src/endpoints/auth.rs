//! Authentication endpoints.

use reqwest::Client;
use reqwest::header::HeaderValue;
use serde_json::Value;
use tracing::debug;

use super::request::{ApiRequest, send_request};
use crate::error::{ClientError, Result};

/// Login to Splunk with username and password, returning the session key.
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    debug!("Logging in to Splunk as {}", username);

    let request = ApiRequest::post_form(
        "/services/auth/login",
        vec![
            ("username", username.to_string()),
            ("password", password.to_string()),
            ("output_mode", "json".to_string()),
        ],
    );

    let body = send_request(client, base_url, None, request)
        .await
        .map_err(|e| match e {
            ClientError::ApiError { status, message } => ClientError::AuthFailed {
                status: Some(status),
                message,
            },
            other => other,
        })?;

    // JSON: `{"sessionKey": ...}`, possibly inside an entry.
    // XML: `<response><sessionKey>...</sessionKey></response>`.
    body.get("sessionKey")
        .and_then(Value::as_str)
        .or_else(|| body.get("entry")?.get(0)?.get("content")?.get("sessionKey")?.as_str())
        .or_else(|| body.get("response")?.get("sessionKey")?.as_str())
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClientError::AuthFailed {
            status: None,
            message: "Missing sessionKey in login response".to_string(),
        })
}

/// Check a bearer authorization header against the server-info endpoint.
pub async fn verify_token(
    client: &Client,
    base_url: &str,
    authorization: &HeaderValue,
) -> Result<()> {
    debug!("Verifying Splunk API token");

    send_request(
        client,
        base_url,
        Some(authorization),
        ApiRequest::get("/services/server/info"),
    )
    .await
    .map(|_| ())
    .map_err(|e| match e {
        ClientError::ApiError { status, .. } => ClientError::TokenAuthFailed { status },
        other => other,
    })
}
