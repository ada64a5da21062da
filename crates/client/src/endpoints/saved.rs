//! Saved search listing endpoint.

use super::request::ApiRequest;
use crate::client::session::Session;
use crate::error::Result;
use crate::models::{SavedSearchInfo, entries};

/// List saved searches, optionally restricted server-side to one owner.
pub async fn list_saved_searches(
    session: &Session,
    owner: Option<&str>,
) -> Result<Vec<SavedSearchInfo>> {
    let mut request = ApiRequest::get("/services/saved/searches");
    if let Some(owner) = owner {
        request = request.param("owner", owner);
    }
    let body = session.send(request).await?;

    Ok(entries::<SavedSearchInfo>(&body)
        .into_iter()
        .map(|entry| SavedSearchInfo {
            name: entry.name,
            owner: entry.author,
            app: entry.acl.map(|acl| acl.app).unwrap_or_default(),
            ..entry.content
        })
        .collect())
}
