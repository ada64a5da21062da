//! Authenticated session state.
//!
//! A `Session` exists only between a successful `connect` and `close`. It owns
//! the HTTP client and the authorization header chosen by the authenticator.
//!
//! # Invariants
//! - The authorization header is set once at construction and never changes.
//! - The header is marked sensitive, so `Debug` output never shows it.

use reqwest::Client;
use reqwest::header::HeaderValue;
use serde_json::Value;

use crate::endpoints::{ApiRequest, send_request};
use crate::error::Result;

#[derive(Debug)]
pub(crate) struct Session {
    http: Client,
    base_url: String,
    authorization: HeaderValue,
}

impl Session {
    pub(crate) fn new(http: Client, base_url: String, authorization: HeaderValue) -> Self {
        Self {
            http,
            base_url,
            authorization,
        }
    }

    /// Send one request with the session's credentials attached.
    pub(crate) async fn send(&self, request: ApiRequest<'_>) -> Result<Value> {
        send_request(&self.http, &self.base_url, Some(&self.authorization), request).await
    }
}
