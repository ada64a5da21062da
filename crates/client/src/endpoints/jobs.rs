//! Search job endpoints.
//!
//! # What this module handles:
//! - Creating search jobs
//! - Reading a job's dispatch state
//! - Retrieving search results
//! - Deleting a job
//!
//! # What this module does NOT handle:
//! - Polling cadence, deadlines, or teardown ordering (see `client::search`)

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::request::ApiRequest;
use super::url_encoding::encode_path_segment;
use crate::client::session::Session;
use crate::error::{ClientError, Result};
use crate::models::{DispatchState, JobStatus, collect_messages, first_entry_content};
use crate::redact_query;

/// Time bounds and result cap for a new job.
#[derive(Debug, Clone)]
pub struct CreateJobOptions<'a> {
    pub earliest_time: &'a str,
    pub latest_time: &'a str,
    pub max_count: u64,
}

/// Create a new search job, returning its sid.
pub async fn create_job(
    session: &Session,
    query: &str,
    options: &CreateJobOptions<'_>,
) -> Result<String> {
    // Never log the raw query
    debug!("Creating search job: {}", redact_query(query));

    let form = vec![
        ("search", query.to_string()),
        ("earliest_time", options.earliest_time.to_string()),
        ("latest_time", options.latest_time.to_string()),
        ("max_count", options.max_count.to_string()),
        ("output_mode", "json".to_string()),
    ];

    let body = session
        .send(ApiRequest::post_form("/services/search/jobs", form))
        .await?;

    // Splunk can return either:
    // - `{ "sid": "<sid>" }`
    // - `{ "entry": [ { "content": { "sid": "<sid>" } } ] }`
    let sid = body
        .get("sid")
        .and_then(Value::as_str)
        .or_else(|| first_entry_content(&body)?.get("sid")?.as_str())
        .ok_or_else(|| ClientError::InvalidResponse("Missing sid in response".to_string()))?;

    Ok(sid.to_string())
}

/// Get the status of a search job.
///
/// A body without entries reports an unknown (non-terminal) state.
pub async fn get_job_status(session: &Session, sid: &str) -> Result<JobStatus> {
    let path = format!("/services/search/jobs/{}", encode_path_segment(sid));
    let body = session.send(ApiRequest::get(&path)).await?;

    let content = first_entry_content(&body);
    let dispatch_state = content
        .and_then(|c| c.get("dispatchState"))
        .and_then(Value::as_str)
        .map(DispatchState::parse)
        .unwrap_or_else(|| DispatchState::Other(String::new()));
    let messages = content
        .and_then(|c| c.get("messages"))
        .map(collect_messages)
        .unwrap_or_default();

    debug!(sid, state = %dispatch_state, "Polled search job");
    Ok(JobStatus {
        dispatch_state,
        messages,
    })
}

/// Fetch `(results, messages)` for a finished job.
pub async fn get_results(
    session: &Session,
    sid: &str,
    max_count: u64,
) -> Result<(Vec<Value>, Vec<Value>)> {
    let path = format!("/services/search/jobs/{}/results", encode_path_segment(sid));
    let body = session
        .send(ApiRequest::get(&path).param("count", max_count.to_string()))
        .await?;

    let list = |key: &str| {
        body.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };
    Ok((list("results"), list("messages")))
}

/// Delete a search job, bounded by `timeout` independent of the client timeout.
pub async fn delete_job(session: &Session, sid: &str, timeout: Duration) -> Result<()> {
    let path = format!("/services/search/jobs/{}", encode_path_segment(sid));
    session
        .send(ApiRequest::delete(&path).timeout(timeout))
        .await
        .map(|_| ())
}
