//! Data models for Splunk API responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod apps;
pub mod common;
pub mod indexes;
pub mod saved_searches;
pub mod search;
pub mod server;

pub use apps::AppInfo;
pub use common::{Acl, Entry, collect_messages, entries, first_entry_content};
pub use indexes::IndexInfo;
pub use saved_searches::SavedSearchInfo;
pub use search::{DispatchState, JobStatus, SearchOutcome};
pub use server::ServerInfo;
