//! Centralized constants for the Splunk MCP workspace.
//!
//! Defaults and bounds shared by the config, client and MCP crates.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default total HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Default earliest time bound for searches.
pub const DEFAULT_EARLIEST_TIME: &str = "-24h@h";

/// Default latest time bound for searches.
pub const DEFAULT_LATEST_TIME: &str = "now";

/// Default maximum number of search results to return.
pub const DEFAULT_MAX_COUNT: u64 = 100;

/// Upper bound accepted for `max_count` on a search tool call.
pub const MAX_MAX_COUNT: u64 = 10_000;

/// Default search timeout in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 60;

/// Upper bound accepted for a search timeout in seconds.
pub const MAX_SEARCH_TIMEOUT_SECS: u64 = 3600;

/// Default polling interval for job status checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Fixed request budget for deleting a search job, in seconds.
/// Independent of the search's own timeout.
pub const TEARDOWN_TIMEOUT_SECS: u64 = 10;
