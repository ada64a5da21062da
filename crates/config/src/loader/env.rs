//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SPLUNK_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Range validation (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over builder values set earlier.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Non-numeric port/timeout values return ConfigError::InvalidPort / InvalidValue.

use secrecy::SecretString;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `true`, `1` and `yes` (any case) enable a flag; every other value disables it.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(host) = env_var_or_none("SPLUNK_HOST") {
        loader.set_host(Some(host));
    }
    if let Some(port) = env_var_or_none("SPLUNK_PORT") {
        let value: i64 = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort { value: port.clone() })?;
        loader.set_port(Some(value));
    }
    if let Some(scheme) = env_var_or_none("SPLUNK_SCHEME") {
        loader.set_scheme(Some(scheme));
    }
    if let Some(token) = env_var_or_none("SPLUNK_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(username) = env_var_or_none("SPLUNK_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("SPLUNK_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(verify) = env_var_or_none("SPLUNK_VERIFY_SSL") {
        loader.set_verify_ssl(Some(parse_flag(&verify)));
    }
    if let Some(timeout) = env_var_or_none("SPLUNK_TIMEOUT") {
        let secs: i64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SPLUNK_TIMEOUT".to_string(),
            message: "must be a whole number of seconds".to_string(),
        })?;
        loader.set_timeout_secs(Some(secs));
    }

    Ok(())
}
