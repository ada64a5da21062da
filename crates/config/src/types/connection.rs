//! Connection configuration types for the Splunk MCP server.
//!
//! Responsibilities:
//! - Define connection settings (host, port, scheme, TLS verification, timeout).
//! - Define the main `Config` structure combining connection and auth.
//!
//! Does NOT handle:
//! - Configuration loading or validation (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Values reaching these types have already been validated by `ConfigLoader::build`.
//! - Nothing here is mutated after construction.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::loader::ConfigError;
use crate::types::auth::AuthConfig;

/// URL scheme used to reach the Splunk management port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ConfigError::InvalidValue {
                var: "SPLUNK_SCHEME".to_string(),
                message: format!("must be either 'http' or 'https' (got '{}')", other),
            }),
        }
    }
}

/// Connection configuration for a Splunk server.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Hostname or IP address of the Splunk management endpoint
    pub host: String,
    /// Management port, always within 1..=65535
    pub port: u16,
    /// `http` or `https`
    pub scheme: Scheme,
    /// Whether to verify the server certificate and hostname (https only)
    pub verify_ssl: bool,
    /// Total per-request timeout
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Base URL of the server, e.g. `https://localhost:8089`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// True when TLS settings apply to this connection.
    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::Https
    }
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}
