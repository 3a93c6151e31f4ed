//! Pure-Rust crypt backend.
//!
//! Uses the `pwhash` crate for MD5-crypt (`$1$`), SHA-256-crypt (`$5$`) and
//! SHA-512-crypt (`$6$`).  `pwhash` parses the salt and the optional
//! `rounds=N` parameter straight out of the stored hash string.  Yescrypt has
//! no implementation here and reports [`VerifyError::SchemeUnavailable`].

use crack_core::{Algorithm, VerifyError};

use super::Crypt;

/// Crypt backend that needs no system library.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableCrypt;

impl Crypt for PortableCrypt {
    fn crypt(&self, algorithm: Algorithm, key: &str, setting: &str) -> Result<String, VerifyError> {
        let computed = match algorithm {
            Algorithm::Md5 => pwhash::md5_crypt::hash_with(setting, key),
            Algorithm::Sha256 => pwhash::sha256_crypt::hash_with(setting, key),
            Algorithm::Sha512 => pwhash::sha512_crypt::hash_with(setting, key),
            Algorithm::Bcrypt | Algorithm::Yescrypt => {
                return Err(VerifyError::SchemeUnavailable(algorithm))
            }
        };
        computed.map_err(|e| VerifyError::MalformedHash {
            algorithm,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(algorithm: Algorithm, password: &str) -> String {
        let setup = pwhash::HashSetup {
            salt: Some("abcdefgh"),
            rounds: None,
        };
        let hashed = match algorithm {
            Algorithm::Md5 => pwhash::md5_crypt::hash_with(setup, password),
            Algorithm::Sha256 => pwhash::sha256_crypt::hash_with(setup, password),
            Algorithm::Sha512 => pwhash::sha512_crypt::hash_with(setup, password),
            other => panic!("no portable hash for {other}"),
        };
        hashed.unwrap()
    }

    #[test]
    fn test_recomputing_with_stored_hash_as_setting_reproduces_it() {
        for alg in [Algorithm::Md5, Algorithm::Sha256, Algorithm::Sha512] {
            // Arrange
            let hash = stored(alg, "x!Z");

            // Act
            let again = PortableCrypt.crypt(alg, "x!Z", &hash).unwrap();

            // Assert
            assert_eq!(again, hash, "{alg} did not round-trip");
        }
    }

    #[test]
    fn test_wrong_key_gives_different_hash() {
        let hash = stored(Algorithm::Sha512, "abc");
        let other = PortableCrypt.crypt(Algorithm::Sha512, "abd", &hash).unwrap();
        assert_ne!(other, hash);
    }

    #[test]
    fn test_stored_hash_carries_expected_prefix() {
        for (alg, prefix) in [
            (Algorithm::Md5, "$1$"),
            (Algorithm::Sha256, "$5$"),
            (Algorithm::Sha512, "$6$"),
        ] {
            let hash = stored(alg, "a");
            assert!(hash.starts_with(prefix), "{hash}");
            assert!(hash.contains("abcdefgh$"), "{hash}");
            assert_eq!(Algorithm::detect(&hash), Ok(alg));
        }
    }

    #[test]
    fn test_yescrypt_is_unavailable() {
        assert_eq!(
            PortableCrypt.crypt(Algorithm::Yescrypt, "a", "$y$j9T$salt$hash"),
            Err(VerifyError::SchemeUnavailable(Algorithm::Yescrypt))
        );
    }
}
