//! Shadow-file lookup.
//!
//! A shadow file holds one account per line, colon separated, with the hash in
//! the second field:
//!
//! ```text
//! alice:$6$saltsalt$Zx...:19700:0:99999:7:::
//! ```
//!
//! The first line that starts with `<username>:` wins.  Lines are not
//! otherwise validated, so a truncated entry (`alice:`) is reported as a
//! malformed hash rather than skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crack_core::{Algorithm, HashTarget};

/// Error type for shadow lookups.
#[derive(Debug, Error)]
pub enum ShadowError {
    #[error("cannot open shadow file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("username not in shadow file")]
    UserNotFound,

    #[error("malformed or unsupported hash entry")]
    Malformed,
}

/// Returns the raw hash field for `username` from shadow-file text.
///
/// # Errors
///
/// [`ShadowError::UserNotFound`] when no line starts with `username:`, and
/// [`ShadowError::Malformed`] when the matching line has an empty hash field.
pub fn find_hash<'a>(content: &'a str, username: &str) -> Result<&'a str, ShadowError> {
    let line = content
        .lines()
        .find(|line| {
            line.strip_prefix(username)
                .is_some_and(|rest| rest.starts_with(':'))
        })
        .ok_or(ShadowError::UserNotFound)?;

    match line.split(':').nth(1) {
        Some(hash) if !hash.is_empty() => Ok(hash),
        _ => Err(ShadowError::Malformed),
    }
}

/// Reads `path` and builds the [`HashTarget`] for `username`.
///
/// # Errors
///
/// [`ShadowError::Open`] when the file cannot be read, otherwise the errors of
/// [`find_hash`], plus [`ShadowError::Malformed`] when the hash carries no
/// recognised algorithm marker.
pub fn load_target(path: &Path, username: &str) -> Result<HashTarget, ShadowError> {
    let content = std::fs::read_to_string(path).map_err(|source| ShadowError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let full_hash = find_hash(&content, username)?;
    let algorithm = Algorithm::detect(full_hash).map_err(|_| ShadowError::Malformed)?;
    debug!("shadow entry for {username}: alg={algorithm}");
    Ok(HashTarget::new(full_hash, algorithm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SHADOW: &str = "\
root:*:19000:0:99999:7:::
alice:$1$salt$Kx6pr0x2bcFNVd5yqNKr//:19700:0:99999:7:::
alicia:$6$abc$def:19700:0:99999:7:::
bob::19700:0:99999:7:::
carol:$y$j9T$salt$hash:19700:0:99999:7:::
";

    #[test]
    fn test_find_hash_returns_second_field() {
        assert_eq!(
            find_hash(SHADOW, "alice").unwrap(),
            "$1$salt$Kx6pr0x2bcFNVd5yqNKr//"
        );
    }

    #[test]
    fn test_find_hash_does_not_match_username_prefix() {
        // "ali" is a prefix of "alice" and "alicia" but not a user.
        assert!(matches!(
            find_hash(SHADOW, "ali"),
            Err(ShadowError::UserNotFound)
        ));
        assert_eq!(find_hash(SHADOW, "alicia").unwrap(), "$6$abc$def");
    }

    #[test]
    fn test_find_hash_empty_field_is_malformed() {
        assert!(matches!(find_hash(SHADOW, "bob"), Err(ShadowError::Malformed)));
    }

    #[test]
    fn test_find_hash_line_without_second_field_is_malformed() {
        assert!(matches!(find_hash("dave:", "dave"), Err(ShadowError::Malformed)));
    }

    #[test]
    fn test_find_hash_first_match_wins() {
        let content = "eve:$5$first$x\neve:$6$second$y\n";
        assert_eq!(find_hash(content, "eve").unwrap(), "$5$first$x");
    }

    #[test]
    fn test_find_hash_tolerates_crlf_line_endings() {
        let content = "frank:$1$s$h:1:2\r\n";
        assert_eq!(find_hash(content, "frank").unwrap(), "$1$s$h");
    }

    #[test]
    fn test_load_target_detects_algorithm() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHADOW.as_bytes()).unwrap();

        // Act
        let target = load_target(file.path(), "carol").unwrap();

        // Assert
        assert_eq!(target.algorithm(), Algorithm::Yescrypt);
        assert_eq!(target.full_hash(), "$y$j9T$salt$hash");
    }

    #[test]
    fn test_load_target_locked_account_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHADOW.as_bytes()).unwrap();

        let err = load_target(file.path(), "root").unwrap_err();

        assert!(matches!(err, ShadowError::Malformed));
        assert_eq!(err.to_string(), "malformed or unsupported hash entry");
    }

    #[test]
    fn test_load_target_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_target(&dir.path().join("shadow"), "alice").unwrap_err();
        assert!(matches!(err, ShadowError::Open { .. }));
        assert!(err.to_string().starts_with("cannot open shadow file"));
    }
}
