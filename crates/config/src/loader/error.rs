//! Configuration errors.
//!
//! Every variant names the offending setting. Secret values and raw `.env`
//! lines never appear in a message.

use std::io::ErrorKind;
use thiserror::Error;

/// Why a [`crate::Config`] could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SPLUNK_HOST is not set")]
    MissingHost,

    #[error("No Splunk credentials: set SPLUNK_TOKEN, or SPLUNK_USERNAME and SPLUNK_PASSWORD")]
    MissingAuth,

    #[error("SPLUNK_PORT must be an integer in 1..=65535 (got {value})")]
    InvalidPort { value: String },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid SPLUNK_TIMEOUT: {message}")]
    InvalidTimeout { message: String },

    /// Only the byte offset is kept; the line itself may hold a secret.
    #[error(".env syntax error at byte {error_index} (set DOTENV_DISABLED=1 to skip .env)")]
    DotenvParse { error_index: usize },

    #[error("Cannot read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Cannot load .env file (set DOTENV_DISABLED=1 to skip .env)")]
    DotenvUnknown,
}
