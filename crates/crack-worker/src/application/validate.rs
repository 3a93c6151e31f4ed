//! Job validation.
//!
//! The JOB message arrives loosely typed.  Before any candidate is tried the
//! worker checks it against its own expectations and turns it into a typed
//! [`JobSpec`].  The checks run in a fixed order and the first failure wins:
//!
//! 1. `password_len` is at least 1 and equals the expected length.
//! 2. `charset` is duplicate-free and equals the expected charset exactly.
//! 3. `alg` is one of the five supported tags.
//! 4. `full_hash` is not empty.

use thiserror::Error;

use crack_core::protocol::messages::JobMessage;
use crack_core::{
    Algorithm, Charset, HashTarget, JobSpec, SearchMode, SearchSettings, SettingsError,
};

/// Reasons a JOB is refused.  The display text is what goes into the
/// `RESULT{status=ERROR}` sent back to the controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid password length")]
    InvalidLength { expected: usize, got: i64 },

    #[error("invalid charset")]
    InvalidCharset,

    #[error("unsupported hash algorithm")]
    UnsupportedAlgorithm(String),

    #[error("empty hash field")]
    EmptyHash,
}

/// What this worker is willing to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobExpectations {
    charset: Charset,
    password_len: usize,
    mode: SearchMode,
}

impl JobExpectations {
    pub fn new(charset: Charset, password_len: usize, mode: SearchMode) -> Self {
        Self {
            charset,
            password_len,
            mode,
        }
    }

    /// Builds expectations from loaded settings.
    ///
    /// # Errors
    ///
    /// Fails when the settings' charset or length is unusable.
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(
            settings.charset()?,
            settings.password_len,
            settings.mode,
        ))
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    pub fn password_len(&self) -> usize {
        self.password_len
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Checks `job` and returns the typed specification.
    ///
    /// # Errors
    ///
    /// The first [`ValidationError`] encountered, in the order listed in the
    /// module docs.
    pub fn validate(&self, job: &JobMessage) -> Result<JobSpec, ValidationError> {
        let length = usize::try_from(job.password_len)
            .ok()
            .filter(|&len| len >= 1 && len == self.password_len)
            .ok_or(ValidationError::InvalidLength {
                expected: self.password_len,
                got: job.password_len,
            })?;

        let charset = Charset::new(&job.charset).map_err(|_| ValidationError::InvalidCharset)?;
        if charset != self.charset {
            return Err(ValidationError::InvalidCharset);
        }

        let algorithm: Algorithm = job
            .alg
            .parse()
            .map_err(|_| ValidationError::UnsupportedAlgorithm(job.alg.clone()))?;

        if job.full_hash.is_empty() {
            return Err(ValidationError::EmptyHash);
        }

        JobSpec::new(
            job.username.clone(),
            HashTarget::new(job.full_hash.clone(), algorithm),
            charset,
            length,
        )
        .map_err(|_| ValidationError::EmptyHash)
    }
}

impl Default for JobExpectations {
    fn default() -> Self {
        Self::new(Charset::reference(), 3, SearchMode::Exact)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
