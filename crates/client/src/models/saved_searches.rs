//! Saved search models for the `/services/saved/searches` listing.

use serde::{Deserialize, Serialize};

/// Saved search information.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedSearchInfo {
    /// Filled from the enclosing entry's `name`.
    #[serde(skip_deserializing)]
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub search: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub description: String,
    /// Filled from the enclosing entry's `author`.
    #[serde(skip_deserializing)]
    pub owner: String,
    /// Filled from the enclosing entry's `acl.app`.
    #[serde(skip_deserializing)]
    pub app: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub cron_schedule: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub next_scheduled_time: String,
}
