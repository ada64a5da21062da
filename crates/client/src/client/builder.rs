//! HTTP client construction for a Splunk connection.
//!
//! Responsibilities:
//! - Translate a validated `ConnectionConfig` into a `reqwest::Client`.
//! - Apply the total timeout, redirect limit, and User-Agent.
//! - Apply the TLS verification opt-out for https connections.
//!
//! Does NOT handle:
//! - Authentication (see `crate::auth`).

use splunk_config::ConnectionConfig;
use splunk_config::constants::DEFAULT_MAX_REDIRECTS;

use crate::error::Result;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("splunk-mcp/", env!("CARGO_PKG_VERSION"));

/// Build the underlying HTTP client for `connection`.
pub(crate) fn build_http_client(connection: &ConnectionConfig) -> Result<reqwest::Client> {
    let mut http_builder = reqwest::Client::builder()
        .timeout(connection.timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

    if connection.is_https() {
        if !connection.verify_ssl {
            // With rustls this disables both chain validation and hostname checks.
            tracing::warn!(
                host = %connection.host,
                "TLS certificate verification is disabled (SPLUNK_VERIFY_SSL=false)"
            );
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }
    } else {
        tracing::warn!(
            host = %connection.host,
            "Connecting to Splunk over plain HTTP; credentials are sent unencrypted"
        );
    }

    Ok(http_builder.build()?)
}
