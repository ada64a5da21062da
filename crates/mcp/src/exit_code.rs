//! Process exit codes for startup failures.
//!
//! Responsibilities:
//! - Map configuration and connection failures to distinct exit codes so
//!   launchers can tell bad settings from an unreachable server.
//!
//! Invariants:
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use splunk_client::ClientError;
use splunk_config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure, including transport I/O errors.
    GeneralError = 1,

    /// Credentials were rejected or no session key was issued.
    AuthenticationFailed = 2,

    /// Network, TLS, or timeout failure while connecting.
    ConnectionError = 3,

    /// Missing or invalid `SPLUNK_*` settings.
    ConfigError = 4,

    /// SIGINT/Ctrl+C before the server finished starting.
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigError;
            }
            if let Some(client_error) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_error);
            }
        }
        ExitCode::GeneralError
    }
}

impl From<&ClientError> for ExitCode {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Config(_) => Self::ConfigError,
            ClientError::AuthFailed { .. } | ClientError::TokenAuthFailed { .. } => {
                Self::AuthenticationFailed
            }
            ClientError::Http(_) | ClientError::ApiError { .. } => Self::ConnectionError,
            ClientError::Cancelled => Self::Interrupted,
            _ => Self::GeneralError,
        }
    }
}
