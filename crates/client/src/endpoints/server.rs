//! Server information endpoint.

use super::request::ApiRequest;
use crate::client::session::Session;
use crate::error::{ClientError, Result};
use crate::models::{ServerInfo, first_entry_content};

/// Get server information from the first entry.
///
/// Returns `None` when the response carries no entries.
pub async fn get_server_info(session: &Session) -> Result<Option<ServerInfo>> {
    let body = session.send(ApiRequest::get("/services/server/info")).await?;

    match first_entry_content(&body) {
        Some(content) => serde_json::from_value(content.clone())
            .map(Some)
            .map_err(|e| {
                ClientError::InvalidResponse(format!("Failed to parse server info: {}", e))
            }),
        None if body.get("entry").and_then(|e| e.get(0)).is_some() => {
            Ok(Some(ServerInfo::default()))
        }
        None => Ok(None),
    }
}
