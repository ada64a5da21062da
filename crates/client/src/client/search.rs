//! Search job lifecycle: submit, poll, fetch, teardown.
//!
//! Responsibilities:
//! - Submit one job and poll its dispatch state on a fixed interval.
//! - Enforce the caller's deadline and honor a cancellation token.
//! - Fetch results once the job is DONE.
//! - Delete the remote job on every path after a successful submit.
//!
//! Does NOT handle:
//! - Query validation (empty query, bounds). The tool layer rejects those first.
//! - Retries. A failed or timed-out search is reported to the caller.
//!
//! Invariants:
//! - Teardown runs after DONE, FAILED, timeout, cancellation and any poll/fetch error.
//! - Teardown failures are logged and never replace the search's own result.
//! - Teardown has its own fixed budget, independent of the search timeout.
//! - Dropping the future mid-poll skips teardown; cancel through the token instead.

use serde_json::Value;
use splunk_config::constants::{
    DEFAULT_EARLIEST_TIME, DEFAULT_LATEST_TIME, DEFAULT_MAX_COUNT, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SEARCH_TIMEOUT_SECS, TEARDOWN_TIMEOUT_SECS,
};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::SplunkClient;
use crate::client::session::Session;
use crate::endpoints::{self, CreateJobOptions};
use crate::error::{ClientError, Result};
use crate::models::{DispatchState, SearchOutcome};
use crate::redact_query;

/// Parameters for one search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub earliest_time: String,
    pub latest_time: String,
    pub max_count: u64,
    /// Wall-clock budget for the job to reach DONE, measured from submission.
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl SearchRequest {
    /// A request with the default time range (`-24h@h` to `now`), 100 results
    /// and a 60 second timeout.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            earliest_time: DEFAULT_EARLIEST_TIME.to_string(),
            latest_time: DEFAULT_LATEST_TIME.to_string(),
            max_count: DEFAULT_MAX_COUNT,
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    pub fn earliest_time(mut self, earliest: impl Into<String>) -> Self {
        self.earliest_time = earliest.into();
        self
    }

    pub fn latest_time(mut self, latest: impl Into<String>) -> Self {
        self.latest_time = latest.into();
        self
    }

    pub fn max_count(mut self, max_count: u64) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl SplunkClient {
    /// Run a search to completion and return its results.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotConnected`] before `connect`.
    /// - [`ClientError::ApiError`] if submission, polling or fetching is rejected.
    /// - [`ClientError::SearchFailed`] if Splunk reports the job FAILED.
    /// - [`ClientError::SearchTimeout`] if the job is not DONE within `request.timeout`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        self.search_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`SplunkClient::search`], but stops polling with
    /// [`ClientError::Cancelled`] as soon as `cancel` fires. The job is still
    /// deleted.
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome> {
        let session = self.session()?;

        let options = CreateJobOptions {
            earliest_time: &request.earliest_time,
            latest_time: &request.latest_time,
            max_count: request.max_count,
        };
        let sid = endpoints::create_job(session, &request.query, &options).await?;
        info!(sid = %sid, query = %redact_query(&request.query), "Created search job");

        let outcome = run_job(session, &sid, request, cancel).await;
        teardown(session, &sid).await;

        match &outcome {
            Ok(done) => info!(
                sid = %sid,
                result_count = done.result_count(),
                search_time = done.search_time,
                "Search completed"
            ),
            Err(e) => warn!(sid = %sid, error = %e, "Search did not complete"),
        }
        outcome
    }
}

/// Poll until DONE, then fetch results. Never deletes the job.
async fn run_job(
    session: &Session,
    sid: &str,
    request: &SearchRequest,
    cancel: &CancellationToken,
) -> Result<SearchOutcome> {
    let submitted = Instant::now();

    loop {
        let status = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            status = endpoints::get_job_status(session, sid) => status?,
        };

        match status.dispatch_state {
            DispatchState::Done => break,
            DispatchState::Failed => {
                return Err(ClientError::SearchFailed {
                    messages: status.messages,
                });
            }
            _ => {}
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(request.poll_interval) => {}
        }

        if submitted.elapsed() >= request.timeout {
            return Err(ClientError::SearchTimeout {
                timeout_secs: request.timeout.as_secs(),
            });
        }
    }

    let (results, messages): (Vec<Value>, Vec<Value>) = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ClientError::Cancelled),
        fetched = endpoints::get_results(session, sid, request.max_count) => fetched?,
    };

    Ok(SearchOutcome {
        sid: sid.to_string(),
        results,
        messages,
        search_time: submitted.elapsed().as_secs_f64(),
    })
}

/// Best-effort DELETE of the job. Failures are logged only.
async fn teardown(session: &Session, sid: &str) {
    let budget = Duration::from_secs(TEARDOWN_TIMEOUT_SECS);
    match endpoints::delete_job(session, sid, budget).await {
        Ok(()) => debug!(sid, "Deleted search job"),
        Err(e) => warn!(sid, error = %e, "Failed to delete search job"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("index=main");
        assert_eq!(request.earliest_time, "-24h@h");
        assert_eq!(request.latest_time, "now");
        assert_eq!(request.max_count, 100);
        assert_eq!(request.timeout, Duration::from_secs(60));
        assert_eq!(request.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_search_request_builders() {
        let request = SearchRequest::new("index=main")
            .earliest_time("-1h")
            .latest_time("-5m")
            .max_count(10)
            .timeout(Duration::from_secs(5))
            .poll_interval(Duration::from_millis(50));
        assert_eq!(request.earliest_time, "-1h");
        assert_eq!(request.latest_time, "-5m");
        assert_eq!(request.max_count, 10);
        assert_eq!(request.timeout, Duration::from_secs(5));
        assert_eq!(request.poll_interval, Duration::from_millis(50));
    }
}
