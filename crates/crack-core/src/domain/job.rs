//! Search target and job specification.
//!
//! A [`HashTarget`] is what the controller extracts from the shadow file; a
//! [`JobSpec`] adds the search parameters and is what travels in the JOB
//! message.  Both are immutable once built: fields are private and only
//! exposed through accessors.

use thiserror::Error;

use crate::domain::algorithm::Algorithm;
use crate::domain::charset::Charset;
use crate::protocol::messages::JobMessage;

/// Errors raised when assembling a [`JobSpec`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobSpecError {
    #[error("password length must be at least 1")]
    ZeroLength,

    #[error("empty hash field")]
    EmptyHash,
}

/// The hash to recover and its detected algorithm family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTarget {
    full_hash: String,
    algorithm: Algorithm,
}

impl HashTarget {
    pub fn new(full_hash: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            full_hash: full_hash.into(),
            algorithm,
        }
    }

    /// Complete crypt-style hash string, prefix and salt included.
    pub fn full_hash(&self) -> &str {
        &self.full_hash
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// One unit of work: who, what hash, and which search space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    username: String,
    target: HashTarget,
    charset: Charset,
    password_length: usize,
}

impl JobSpec {
    /// Builds a job.
    ///
    /// `charset` is already guaranteed duplicate-free by its own constructor.
    ///
    /// # Errors
    ///
    /// Returns [`JobSpecError::ZeroLength`] for `password_length == 0` and
    /// [`JobSpecError::EmptyHash`] for an empty hash string.
    pub fn new(
        username: impl Into<String>,
        target: HashTarget,
        charset: Charset,
        password_length: usize,
    ) -> Result<Self, JobSpecError> {
        if password_length == 0 {
            return Err(JobSpecError::ZeroLength);
        }
        if target.full_hash().is_empty() {
            return Err(JobSpecError::EmptyHash);
        }
        Ok(Self {
            username: username.into(),
            target,
            charset,
            password_length,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn target(&self) -> &HashTarget {
        &self.target
    }

    pub fn full_hash(&self) -> &str {
        self.target.full_hash()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.target.algorithm()
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    pub fn password_length(&self) -> usize {
        self.password_length
    }

    /// Wire representation for the JOB record.
    pub fn to_message(&self) -> JobMessage {
        JobMessage {
            username: self.username.clone(),
            full_hash: self.target.full_hash().to_string(),
            alg: self.target.algorithm().as_str().to_string(),
            charset: self.charset.to_string(),
            password_len: self.password_length as i64,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
