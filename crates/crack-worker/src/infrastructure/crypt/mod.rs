//! Crypt-backed hash verification.
//!
//! [`CryptVerifier`] is the worker's production [`HashVerifier`].  It splits
//! the supported families in two:
//!
//! - **bcrypt** hashes are self-salted; the `bcrypt` crate compares a
//!   candidate directly against the stored string.
//! - **MD5 / SHA-256 / SHA-512 / yescrypt** are crypt(3)-style: the stored
//!   hash doubles as the *setting* string, so recomputing the candidate with
//!   the full hash as setting must reproduce the stored hash byte for byte.
//!
//! The recomputation goes through the [`Crypt`] backend trait:
//!
//! | Backend           | Availability                      | Families                     |
//! |-------------------|-----------------------------------|------------------------------|
//! | [`PortableCrypt`] | always (pure Rust)                | MD5, SHA-256, SHA-512        |
//! | `SystemCrypt`     | Linux with `libcrypt` (a default) | whatever libcrypt has, yescrypt included |
//!
//! [`DefaultCrypt`] names the backend the binary uses.

mod portable;
#[cfg(all(feature = "libcrypt", target_os = "linux"))]
mod system;

pub use portable::PortableCrypt;
#[cfg(all(feature = "libcrypt", target_os = "linux"))]
pub use system::SystemCrypt;

use tracing::trace;

use crack_core::{Algorithm, HashVerifier, Verdict, VerifyError};

/// Recomputes a crypt(3)-style hash.
#[cfg_attr(test, mockall::automock)]
pub trait Crypt: Send {
    /// Hashes `key` using `setting` (prefix, parameters and salt; a complete
    /// stored hash is accepted) and returns the full hash string.
    ///
    /// # Errors
    ///
    /// [`VerifyError`] when the backend cannot compute this scheme or rejects
    /// the setting.
    fn crypt(&self, algorithm: Algorithm, key: &str, setting: &str) -> Result<String, VerifyError>;
}

/// Backend compiled into the worker binary.
#[cfg(all(feature = "libcrypt", target_os = "linux"))]
pub type DefaultCrypt = SystemCrypt;
/// Backend compiled into the worker binary.
#[cfg(not(all(feature = "libcrypt", target_os = "linux")))]
pub type DefaultCrypt = PortableCrypt;

/// [`HashVerifier`] built on bcrypt plus a [`Crypt`] backend.
#[derive(Debug, Default)]
pub struct CryptVerifier<C> {
    crypt: C,
}

impl<C: Crypt> CryptVerifier<C> {
    pub fn new(crypt: C) -> Self {
        Self { crypt }
    }
}

impl CryptVerifier<DefaultCrypt> {
    /// Verifier over the default backend.
    pub fn system_default() -> Self {
        Self::new(DefaultCrypt::default())
    }
}

impl<C: Crypt> HashVerifier for CryptVerifier<C> {
    fn verify(
        &self,
        algorithm: Algorithm,
        candidate: &str,
        full_hash: &str,
    ) -> Result<Verdict, VerifyError> {
        match algorithm {
            Algorithm::Bcrypt => bcrypt::verify(candidate, full_hash)
                .map(Verdict::from)
                .map_err(|e| VerifyError::MalformedHash {
                    algorithm,
                    reason: e.to_string(),
                }),
            Algorithm::Md5 | Algorithm::Sha256 | Algorithm::Sha512 | Algorithm::Yescrypt => {
                let computed = self.crypt.crypt(algorithm, candidate, full_hash)?;
                trace!("{algorithm} recomputed {computed}");
                Ok(Verdict::from(computed == full_hash))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
