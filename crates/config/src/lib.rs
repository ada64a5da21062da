//! Configuration management for the Splunk MCP server.
//!
//! This crate provides types and loaders for managing Splunk connection
//! configuration from environment variables and `.env` files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, Scheme};
