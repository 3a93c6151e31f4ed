//! The closed set of supported hash algorithm families.
//!
//! Each family has a lower-case wire tag (carried in the JOB `alg` field) and
//! one or more leading markers in the crypt-style hash string:
//!
//! | Algorithm  | Wire tag   | Hash prefix(es)           |
//! |------------|------------|---------------------------|
//! | `Md5`      | `md5`      | `$1$`                     |
//! | `Sha256`   | `sha256`   | `$5$`                     |
//! | `Sha512`   | `sha512`   | `$6$`                     |
//! | `Bcrypt`   | `bcrypt`   | `$2a$`, `$2b$`, `$2y$`    |
//! | `Yescrypt` | `yescrypt` | `$y$`, `$7$`              |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when turning strings into an [`Algorithm`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlgorithmError {
    /// The wire tag is not one of the five supported families.
    #[error("unsupported hash algorithm: {0:?}")]
    UnknownTag(String),

    /// The hash string does not start with any recognised prefix.
    #[error("malformed or unsupported hash entry")]
    UnrecognisedPrefix,
}

/// A supported hash algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha256,
    Sha512,
    Bcrypt,
    Yescrypt,
}

/// Leading hash-string markers of each family.
const PREFIXES: &[(&str, Algorithm)] = &[
    ("$1$", Algorithm::Md5),
    ("$5$", Algorithm::Sha256),
    ("$6$", Algorithm::Sha512),
    ("$2a$", Algorithm::Bcrypt),
    ("$2b$", Algorithm::Bcrypt),
    ("$2y$", Algorithm::Bcrypt),
    ("$y$", Algorithm::Yescrypt),
    ("$7$", Algorithm::Yescrypt),
];

impl Algorithm {
    /// All supported families, in declaration order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Bcrypt,
        Algorithm::Yescrypt,
    ];

    /// Returns the lower-case wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Yescrypt => "yescrypt",
        }
    }

    /// Detects the family of a crypt-style hash from its leading marker.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnrecognisedPrefix`] for DES-crypt, locked
    /// (`!`, `*`) entries and anything else without a known marker.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crack_core::Algorithm;
    ///
    /// assert_eq!(Algorithm::detect("$6$salt$digest").unwrap(), Algorithm::Sha512);
    /// assert!(Algorithm::detect("!locked").is_err());
    /// ```
    pub fn detect(full_hash: &str) -> Result<Self, AlgorithmError> {
        PREFIXES
            .iter()
            .find(|(prefix, _)| full_hash.starts_with(*prefix))
            .map(|&(_, alg)| alg)
            .ok_or(AlgorithmError::UnrecognisedPrefix)
    }

    /// Returns `true` for families whose hash string doubles as the crypt(3)
    /// setting, i.e. everything but bcrypt.
    pub fn is_crypt_style(&self) -> bool {
        !matches!(self, Algorithm::Bcrypt)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| AlgorithmError::UnknownTag(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
