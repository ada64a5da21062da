//! Error types for the Splunk client.
//!
//! Responsibilities:
//! - Define the failure taxonomy for connect, transport, and search operations.
//! - Classify authentication failures for callers.
//!
//! Invariants:
//! - Credential values never appear in error messages.

use splunk_config::ConfigError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Splunk client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Username/password login was rejected or returned no session key.
    #[error("Authentication failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    AuthFailed {
        status: Option<u16>,
        message: String,
    },

    /// The bearer token did not pass the verification call.
    #[error("Token authentication failed with status {status}")]
    TokenAuthFailed { status: u16 },

    /// A request was issued before `connect` (or after `close`).
    #[error("Not connected to Splunk")]
    NotConnected,

    /// Non-2xx response from Splunk.
    #[error("API request failed ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Splunk reported the search job as FAILED.
    #[error("Search failed: {}", format_messages(.messages))]
    SearchFailed { messages: Vec<String> },

    /// The job did not reach a terminal state within the configured timeout.
    #[error("Search timed out after {timeout_secs} seconds")]
    SearchTimeout { timeout_secs: u64 },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format from Splunk.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        "no message from server".to_string()
    } else {
        messages.join("; ")
    }
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed { .. } | Self::TokenAuthFailed { .. }
        ) || matches!(self, Self::ApiError { status, .. } if *status == 401 || *status == 403)
    }
}
