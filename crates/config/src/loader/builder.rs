//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` collecting raw connection values.
//! - Support loading from `.env` files, environment variables, and direct builder methods.
//! - Validate everything once in `build()` and produce an immutable `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over builder values set before `from_env()`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before any dotenv file is read.
//! - Port and timeout are held as wide integers until `build()` range-checks them.

use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_SPLUNK_PORT, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, Scheme};

/// Configuration loader that builds config from the environment and builder calls.
#[derive(Default)]
pub struct ConfigLoader {
    host: Option<String>,
    port: Option<i64>,
    scheme: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    token: Option<SecretString>,
    verify_ssl: Option<bool>,
    timeout_secs: Option<i64>,
    env_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        std::env::var("DOTENV_DISABLED")
            .map(|v| {
                let v = v.trim();
                v == "1" || v.eq_ignore_ascii_case("true")
            })
            .unwrap_or(false)
    }

    /// Load environment variables from a dotenv file.
    ///
    /// Reads the file set with [`ConfigLoader::with_env_file`], or `.env` in the
    /// current directory otherwise. If `DOTENV_DISABLED` is `1` or `true` (any case),
    /// nothing is read.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` when the file has invalid syntax.
    /// - `ConfigError::DotenvIo` when the file cannot be read. A missing implicit
    ///   `.env` is not an error; a missing explicit file is.
    ///
    /// Error messages never include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        let result = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| ()),
            None => match dotenvy::dotenv() {
                Err(e) if Self::is_not_found(&e) => Ok(()),
                other => other.map(|_| ()),
            },
        };

        match result {
            Ok(()) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use an explicit dotenv file instead of `./.env`.
    pub fn with_env_file(mut self, path: PathBuf) -> Self {
        self.env_file = Some(path);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(i64::from(port));
        self
    }

    pub fn with_scheme(mut self, scheme: String) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Set the per-request timeout. Sub-second precision is dropped.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX));
        self
    }

    /// Build the final configuration.
    ///
    /// Validation order: host, port, scheme, credentials, timeout.
    pub fn build(self) -> Result<Config, ConfigError> {
        let host = self
            .host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingHost)?;

        let port = validate_port(self.port.unwrap_or(i64::from(DEFAULT_SPLUNK_PORT)))?;

        let scheme = match self.scheme.as_deref() {
            Some(raw) => Scheme::from_str(raw)?,
            None => Scheme::default(),
        };

        // Blank values count as unset.
        let token = self.token.filter(|t| !t.expose_secret().trim().is_empty());
        let username = self.username.filter(|u| !u.trim().is_empty());
        let password = self.password.filter(|p| !p.expose_secret().is_empty());

        // API token takes precedence over username/password
        let strategy = match (token, username, password) {
            (Some(token), username, password) => {
                if username.is_some() || password.is_some() {
                    tracing::warn!(
                        "Both SPLUNK_TOKEN and SPLUNK_USERNAME/SPLUNK_PASSWORD are set; using the token"
                    );
                }
                AuthStrategy::ApiToken { token }
            }
            (None, Some(username), Some(password)) => {
                AuthStrategy::SessionToken { username, password }
            }
            _ => return Err(ConfigError::MissingAuth),
        };

        let timeout = validate_timeout(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS as i64))?;

        Ok(Config {
            connection: ConnectionConfig {
                host,
                port,
                scheme,
                verify_ssl: self.verify_ssl.unwrap_or(true),
                timeout,
            },
            auth: AuthConfig { strategy },
        })
    }

    pub(crate) fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    pub(crate) fn set_port(&mut self, port: Option<i64>) {
        self.port = port;
    }

    pub(crate) fn set_scheme(&mut self, scheme: Option<String>) {
        self.scheme = scheme;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_verify_ssl(&mut self, verify: Option<bool>) {
        self.verify_ssl = verify;
    }

    pub(crate) fn set_timeout_secs(&mut self, secs: Option<i64>) {
        self.timeout_secs = secs;
    }
}

fn validate_port(value: i64) -> Result<u16, ConfigError> {
    u16::try_from(value)
        .ok()
        .filter(|p| *p != 0)
        .ok_or(ConfigError::InvalidPort {
            value: value.to_string(),
        })
}

fn validate_timeout(secs: i64) -> Result<Duration, ConfigError> {
    if secs <= 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    let secs = secs as u64;
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(Duration::from_secs(secs))
}
