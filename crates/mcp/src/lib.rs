//! Splunk MCP server library.
//!
//! Exposes Splunk search and listing operations as Model Context Protocol
//! tools over newline-delimited JSON-RPC on stdio.
//!
//! - [`protocol`]: JSON-RPC message types and error codes
//! - [`tools`]: tool catalog and input schemas
//! - [`handlers`]: method routing, argument validation, result envelopes
//! - [`server`]: stdio loop, per-call tasks, cancellation, shutdown
//! - [`exit_code`]: process exit codes for startup failures

pub mod exit_code;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
