//! Index models for the `/services/data/indexes` listing.

use serde::{Deserialize, Serialize};

fn default_max_data_size() -> String {
    "auto".to_string()
}

/// Index information as reported to callers.
///
/// Field names on the wire keep Splunk's own spelling.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IndexInfo {
    /// Filled from the enclosing entry's `name`.
    #[serde(skip_deserializing)]
    pub name: String,
    #[serde(
        rename = "currentDBSizeMB",
        default,
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub current_db_size_mb: f64,
    #[serde(
        rename = "maxDataSize",
        default = "default_max_data_size",
        deserialize_with = "crate::serde_helpers::string_from_any"
    )]
    pub max_data_size: String,
    #[serde(
        rename = "totalEventCount",
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub total_event_count: u64,
    #[serde(default, deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub disabled: bool,
}
