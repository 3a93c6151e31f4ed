//! The cracking engine: exhaustive, ordered, fail-fast search.
//!
//! # State machine
//!
//! ```text
//!            run()
//!   Idle ───────────► Searching ──┬─► Found     (first Match)
//!                                 ├─► NotFound  (space exhausted)
//!                                 └─► Failed    (VerifyError / space too large)
//! ```
//!
//! All three end states are terminal.  The engine verifies candidates in
//! exactly the order produced by [`Candidates`], calls the verifier once per
//! candidate, stops at the first match and aborts the whole job on the first
//! verification error.  Only the time spent in `Searching` is measured.

use std::time::Instant;

use tracing::{info, trace, warn};

use crate::domain::job::JobSpec;
use crate::domain::result::{SearchOutcome, SearchResult};
use crate::search::enumerator::Candidates;
use crate::search::verifier::{HashVerifier, Verdict};
use crate::settings::SearchMode;

/// Lifecycle of a [`CrackingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Searching,
    Found,
    NotFound,
    Failed,
}

impl EngineState {
    /// `Found`, `NotFound` and `Failed` are final.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EngineState::Found | EngineState::NotFound | EngineState::Failed
        )
    }
}

/// Drives the enumerator and a verifier over one job's search space.
pub struct CrackingEngine<V> {
    verifier: V,
    mode: SearchMode,
    state: EngineState,
    attempts: u64,
}

impl<V: HashVerifier> CrackingEngine<V> {
    /// Creates an idle engine.
    pub fn new(verifier: V, mode: SearchMode) -> Self {
        Self {
            verifier,
            mode,
            state: EngineState::Idle,
            attempts: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of candidates handed to the verifier so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Runs the search to completion and returns the single terminal result.
    ///
    /// An engine searches once.  Calling `run` on an engine that already
    /// reached a terminal state returns an error result without touching the
    /// verifier.
    pub fn run(&mut self, job: &JobSpec) -> SearchResult {
        if self.state.is_terminal() {
            return SearchResult::new(
                SearchOutcome::Error {
                    message: "engine has already completed a search".to_string(),
                },
                std::time::Duration::ZERO,
            );
        }

        let started = Instant::now();
        self.state = EngineState::Searching;
        let outcome = self.search(job);
        let elapsed = started.elapsed();

        self.state = match outcome {
            SearchOutcome::Found { .. } => EngineState::Found,
            SearchOutcome::NotFound => EngineState::NotFound,
            SearchOutcome::Error { .. } => EngineState::Failed,
        };

        info!(
            "search finished: {:?} after {} candidate(s) in {:?}",
            self.state, self.attempts, elapsed
        );
        SearchResult::new(outcome, elapsed)
    }

    fn search(&mut self, job: &JobSpec) -> SearchOutcome {
        let lengths = self.mode.lengths(job.password_length());
        let candidates = match Candidates::new(job.charset(), lengths.clone()) {
            Ok(c) => c,
            Err(e) => {
                warn!("refusing job: {e}");
                return SearchOutcome::Error {
                    message: e.to_string(),
                };
            }
        };

        info!(
            "searching {} candidate(s): alg={}, charset size={}, lengths {}..={}",
            candidates.total(),
            job.algorithm(),
            job.charset().len(),
            lengths.start(),
            lengths.end()
        );

        for candidate in candidates {
            self.attempts += 1;
            trace!("testing candidate {candidate:?}");

            match self
                .verifier
                .verify(job.algorithm(), &candidate, job.full_hash())
            {
                Ok(Verdict::Match) => return SearchOutcome::Found { password: candidate },
                Ok(Verdict::NoMatch) => {}
                Err(e) => {
                    warn!("verification failed on candidate #{}: {e}", self.attempts);
                    return SearchOutcome::Error {
                        message: e.to_string(),
                    };
                }
            }
        }

        SearchOutcome::NotFound
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
