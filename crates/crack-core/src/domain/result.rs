//! Terminal result of a search.

use std::time::Duration;

use crate::protocol::messages::{ResultMessage, ResultStatus};

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A candidate matched; the search stopped there.
    Found { password: String },
    /// Every candidate was tried without a match.
    NotFound,
    /// The search was aborted (verification failure, unsearchable space).
    Error { message: String },
}

/// The single, immutable result of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Wall time spent in the searching state only, I/O excluded.
    pub compute_duration: Duration,
}

impl SearchResult {
    pub fn new(outcome: SearchOutcome, compute_duration: Duration) -> Self {
        Self {
            outcome,
            compute_duration,
        }
    }

    pub fn status(&self) -> ResultStatus {
        match self.outcome {
            SearchOutcome::Found { .. } => ResultStatus::Found,
            SearchOutcome::NotFound => ResultStatus::NotFound,
            SearchOutcome::Error { .. } => ResultStatus::Error,
        }
    }

    /// Wire representation for the RESULT record.
    ///
    /// The compute time saturates at `u64::MAX` nanoseconds (about 584 years).
    pub fn to_message(&self) -> ResultMessage {
        let (password, error) = match &self.outcome {
            SearchOutcome::Found { password } => (Some(password.clone()), None),
            SearchOutcome::NotFound => (None, None),
            SearchOutcome::Error { message } => (None, Some(message.clone())),
        };
        ResultMessage {
            status: self.status(),
            password,
            error,
            worker_compute_ns: u64::try_from(self.compute_duration.as_nanos()).unwrap_or(u64::MAX),
        }
    }
}
