//! Configuration type definitions for the Splunk MCP server.
//!
//! Responsibilities:
//! - Define the credential forms accepted by the server.
//! - Define the immutable connection settings (host, port, scheme, TLS, timeout).
//!
//! Does NOT handle:
//! - Loading values from the environment (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - A `Config` always carries exactly one credential form.

mod auth;
mod connection;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig, Scheme};
