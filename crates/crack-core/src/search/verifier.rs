//! Hash verification seam.
//!
//! The engine never hashes anything itself.  It asks a [`HashVerifier`]
//! whether a candidate reproduces the target hash, and the verifier answers
//! with a [`Verdict`] or a [`VerifyError`].
//!
//! The production implementation (bcrypt plus crypt(3)-style recomputation)
//! lives in the worker crate.  Tests substitute a deterministic stub or a
//! `mockall` mock so the enumeration order, halting policy and error
//! propagation can be checked without any platform hashing primitive.

use thiserror::Error;

use crate::domain::algorithm::Algorithm;

/// Result of comparing one candidate with the target hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }
}

/// A candidate could not be checked at all.
///
/// Any of these aborts the whole search.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The algorithm is known but this host cannot compute it.
    #[error("{0} hashing is not supported on this host")]
    SchemeUnavailable(Algorithm),

    /// The stored hash string cannot be parsed by its scheme.
    #[error("malformed {algorithm} hash: {reason}")]
    MalformedHash { algorithm: Algorithm, reason: String },

    /// The hashing backend failed while recomputing.
    #[error("{0}")]
    Backend(String),
}

/// Checks password candidates against a crypt-style hash.
///
/// Implementations must be free of hidden state: identical inputs always
/// produce identical outputs.
#[cfg_attr(test, mockall::automock)]
pub trait HashVerifier: Send {
    /// Compares `candidate` with `full_hash` under `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError`] when the comparison cannot be carried out.
    /// A plain mismatch is `Ok(Verdict::NoMatch)`, never an error.
    fn verify(
        &self,
        algorithm: Algorithm,
        candidate: &str,
        full_hash: &str,
    ) -> Result<Verdict, VerifyError>;
}

impl<V: HashVerifier + ?Sized> HashVerifier for Box<V> {
    fn verify(
        &self,
        algorithm: Algorithm,
        candidate: &str,
        full_hash: &str,
    ) -> Result<Verdict, VerifyError> {
        (**self).verify(algorithm, candidate, full_hash)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
