//! Index listing endpoint.

use super::request::ApiRequest;
use crate::client::session::Session;
use crate::error::Result;
use crate::models::{IndexInfo, entries};

/// List all indexes in server order.
pub async fn list_indexes(session: &Session) -> Result<Vec<IndexInfo>> {
    let body = session.send(ApiRequest::get("/services/data/indexes")).await?;

    Ok(entries::<IndexInfo>(&body)
        .into_iter()
        .map(|entry| IndexInfo {
            name: entry.name,
            ..entry.content
        })
        .collect())
}
