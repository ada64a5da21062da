//! Server information model for `/services/server/info`.

use serde::{Deserialize, Serialize};

/// Fixed subset of the server-info content reported to callers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ServerInfo {
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub version: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub build: String,
    #[serde(
        rename = "serverName",
        default,
        deserialize_with = "crate::serde_helpers::string_from_any"
    )]
    pub server_name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub host: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub product_type: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub license_state: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub mode: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub startup_time: String,
}
