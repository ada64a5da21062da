//! Splunk REST API client.
//!
//! This crate provides the Transport Session ([`SplunkClient`]) used by the MCP
//! server: one authenticated connection to a Splunk management port, the
//! search job lifecycle, and the read-only listing operations. It supports
//! API token and username/password authentication.

mod auth;
pub mod client;
pub(crate) mod endpoints;
pub mod error;
pub mod models;
pub mod normalize;
mod serde_helpers;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub use client::builder::USER_AGENT;
pub use client::{SearchRequest, SplunkClient};
pub use error::{ClientError, Result};
pub use models::{AppInfo, IndexInfo, SavedSearchInfo, SearchOutcome, ServerInfo};
pub use tokio_util::sync::CancellationToken;

/// Summarize a search query for logs without revealing its text.
///
/// Output looks like `<42 chars, hash=296582a1>`; equal queries share a hash.
pub fn redact_query(query: &str) -> String {
    let mut hasher = DefaultHasher::new();
    query.hash(&mut hasher);
    let hash = hasher.finish();
    format!("<{} chars, hash={:08x}>", query.len(), hash)
}
