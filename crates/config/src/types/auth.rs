//! Splunk credentials.
//!
//! Exactly one strategy is held: a token, or a username/password pair that
//! the client exchanges for a session key at connect time. Secrets are
//! `SecretString` so `Debug` output stays safe to log.

use secrecy::SecretString;

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password, traded for a session key by `/services/auth/login`.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// Sent as `Authorization: Bearer <token>`.
    ApiToken { token: SecretString },
}

impl AuthStrategy {
    /// Short, non-secret label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionToken { .. } => "session",
            Self::ApiToken { .. } => "token",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub strategy: AuthStrategy,
}
