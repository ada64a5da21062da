//! Installed app listing endpoint.

use super::request::ApiRequest;
use crate::client::session::Session;
use crate::error::Result;
use crate::models::{AppInfo, entries};

/// List locally installed apps, visible or not.
pub async fn list_apps(session: &Session) -> Result<Vec<AppInfo>> {
    let body = session.send(ApiRequest::get("/services/apps/local")).await?;

    Ok(entries::<AppInfo>(&body)
        .into_iter()
        .map(|entry| AppInfo {
            name: entry.name,
            author: entry.author,
            ..entry.content
        })
        .collect())
}
