//! Authenticator: turns configured credentials into a session authorization header.
//!
//! Responsibilities:
//! - Token path: build a `Bearer` header and verify it with one server-info call.
//! - Username/password path: exchange credentials for a session key and build a
//!   `Splunk <key>` header.
//!
//! Does NOT handle:
//! - Session renewal. Authentication runs once per `connect`.
//!
//! Invariants:
//! - Returned header values are marked sensitive.
//! - Secrets are exposed only while building the request or header.

use reqwest::Client;
use reqwest::header::HeaderValue;
use secrecy::ExposeSecret;
use splunk_config::{AuthStrategy, ConfigError};
use tracing::info;

use crate::endpoints;
use crate::error::{ClientError, Result};

/// Authenticate against `base_url` and return the header to send on every request.
pub(crate) async fn authenticate(
    http: &Client,
    base_url: &str,
    strategy: &AuthStrategy,
) -> Result<HeaderValue> {
    match strategy {
        AuthStrategy::ApiToken { token } => {
            let token = token.expose_secret();
            if token.trim().is_empty() {
                return Err(ConfigError::MissingAuth.into());
            }
            let header = sensitive_header(format!("Bearer {}", token))?;
            endpoints::verify_token(http, base_url, &header).await?;
            info!("Token authentication successful");
            Ok(header)
        }
        AuthStrategy::SessionToken { username, password } => {
            if username.trim().is_empty() || password.expose_secret().is_empty() {
                return Err(ConfigError::MissingAuth.into());
            }
            let session_key =
                endpoints::login(http, base_url, username, password.expose_secret()).await?;
            let header = sensitive_header(format!("Splunk {}", session_key))?;
            info!(username = %username, "Username/password authentication successful");
            Ok(header)
        }
    }
}

fn sensitive_header(value: String) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(&value).map_err(|_| ClientError::AuthFailed {
        status: None,
        message: "credential contains characters not allowed in an HTTP header".to_string(),
    })?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_header_hides_value_in_debug() {
        let header = sensitive_header("Bearer secret-token-value".to_string()).unwrap();
        assert!(header.is_sensitive());
        assert!(!format!("{:?}", header).contains("secret-token-value"));
    }

    #[test]
    fn test_sensitive_header_rejects_control_characters() {
        let err = sensitive_header("Bearer bad\ntoken".to_string()).unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed { status: None, .. }));
    }
}
