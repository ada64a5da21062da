//! Search job models.
//!
//! Responsibilities:
//! - Model a job's dispatch state as reported by `/services/search/jobs/{sid}`.
//! - Carry the outcome of a completed search back to callers.
//!
//! Does NOT handle:
//! - Polling or teardown (see `client::search`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lifecycle status of an asynchronous search job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    Queued,
    Parsing,
    Running,
    Finalizing,
    Paused,
    Done,
    Failed,
    /// A state this client does not know, or an absent state.
    Other(String),
}

impl DispatchState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "QUEUED" => Self::Queued,
            "PARSING" => Self::Parsing,
            "RUNNING" => Self::Running,
            "FINALIZING" => Self::Finalizing,
            "PAUSED" => Self::Paused,
            "DONE" => Self::Done,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "QUEUED"),
            Self::Parsing => write!(f, "PARSING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Finalizing => write!(f, "FINALIZING"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Done => write!(f, "DONE"),
            Self::Failed => write!(f, "FAILED"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One observation of a job's status.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub dispatch_state: DispatchState,
    /// Flattened platform messages, used when the job FAILED.
    pub messages: Vec<String>,
}

/// Results of a completed search job.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchOutcome {
    /// Job identifier assigned by Splunk (already deleted server-side).
    pub sid: String,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub messages: Vec<Value>,
    /// Seconds between job submission and results retrieval.
    pub search_time: f64,
}

impl SearchOutcome {
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}
