//! App models for the `/services/apps/local` listing.

use serde::{Deserialize, Serialize};

fn default_visible() -> bool {
    true
}

/// Splunk app information.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppInfo {
    /// Filled from the enclosing entry's `name`.
    #[serde(skip_deserializing)]
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub label: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub version: String,
    /// Filled from the enclosing entry's `author`.
    #[serde(skip_deserializing)]
    pub author: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub configured: bool,
    /// Only an explicit false hides an app; absent or null means visible.
    #[serde(
        default = "default_visible",
        deserialize_with = "crate::serde_helpers::bool_from_any_or_true",
        skip_serializing
    )]
    pub visible: bool,
}
