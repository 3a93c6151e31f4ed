//! Search settings shared by the controller and the worker.
//!
//! Both roles must agree on the charset, the password length and the search
//! mode: the controller writes them into the JOB, the worker refuses any JOB
//! that does not match its own copy.  Defaults reproduce the reference
//! deployment, and a TOML file can override any subset of the fields:
//!
//! ```toml
//! charset = "abc"
//! password_len = 4
//! mode = "up-to"
//! ```
//!
//! Missing fields fall back to their defaults through
//! `#[serde(default = "...")]`, so an empty file is a valid configuration.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::charset::{Charset, CharsetError, REFERENCE_CHARSET};

/// Error type for loading and checking [`SearchSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid charset in settings: {0}")]
    Charset(#[from] CharsetError),

    #[error("password_len must be at least 1")]
    ZeroLength,
}

// ── Search mode ───────────────────────────────────────────────────────────────

/// Which candidate lengths a search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Only candidates of exactly `password_len` characters.
    #[default]
    Exact,
    /// Every length from 1 through `password_len`, shortest first.
    UpTo,
}

impl SearchMode {
    pub fn lengths(&self, password_len: usize) -> RangeInclusive<usize> {
        match self {
            SearchMode::Exact => password_len..=password_len,
            SearchMode::UpTo => 1..=password_len,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::UpTo => "up-to",
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(SearchMode::Exact),
            "up-to" => Ok(SearchMode::UpTo),
            other => Err(format!("unknown search mode {other:?} (expected \"exact\" or \"up-to\")")),
        }
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Charset, length and mode for a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_charset")]
    pub charset: String,
    #[serde(default = "default_password_len")]
    pub password_len: usize,
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_charset() -> String {
    REFERENCE_CHARSET.to_string()
}
fn default_password_len() -> usize {
    3
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            password_len: default_password_len(),
            mode: SearchMode::default(),
        }
    }
}

impl SearchSettings {
    /// Parses and checks settings from TOML text.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Parse`] for malformed TOML, or the first failure of
    /// [`SearchSettings::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: SearchSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `path`.
    ///
    /// Unlike a per-user config file, an explicitly named settings file must
    /// exist, so "not found" is an error here.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] when the file cannot be read, otherwise as for
    /// [`SearchSettings::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks the charset and the length.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.password_len == 0 {
            return Err(SettingsError::ZeroLength);
        }
        Charset::new(&self.charset)?;
        Ok(())
    }

    /// The charset as a checked [`Charset`].
    pub fn charset(&self) -> Result<Charset, SettingsError> {
        Ok(Charset::new(&self.charset)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings_match_reference_deployment() {
        let s = SearchSettings::default();
        assert_eq!(s.charset, REFERENCE_CHARSET);
        assert_eq!(s.password_len, 3);
        assert_eq!(s.mode, SearchMode::Exact);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let s = SearchSettings::from_toml_str("").unwrap();
        assert_eq!(s, SearchSettings::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        // Arrange
        let toml_str = "password_len = 4\nmode = \"up-to\"\n";

        // Act
        let s = SearchSettings::from_toml_str(toml_str).unwrap();

        // Assert
        assert_eq!(s.password_len, 4);
        assert_eq!(s.mode, SearchMode::UpTo);
        assert_eq!(s.charset, REFERENCE_CHARSET);
    }

    #[test]
    fn test_duplicate_charset_is_rejected() {
        let err = SearchSettings::from_toml_str("charset = \"abca\"").unwrap_err();
        assert!(matches!(err, SettingsError::Charset(CharsetError::Duplicate('a'))));
    }

    #[test]
    fn test_zero_length_is_rejected() {
        let err = SearchSettings::from_toml_str("password_len = 0").unwrap_err();
        assert!(matches!(err, SettingsError::ZeroLength));
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let err = SearchSettings::from_toml_str("mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "charset = \"xyz\"").unwrap();
        writeln!(file, "password_len = 2").unwrap();

        // Act
        let s = SearchSettings::load(file.path()).unwrap();

        // Assert
        assert_eq!(s.charset().unwrap().len(), 3);
        assert_eq!(s.password_len, 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchSettings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_mode_lengths() {
        assert_eq!(SearchMode::Exact.lengths(3), 3..=3);
        assert_eq!(SearchMode::UpTo.lengths(3), 1..=3);
    }

    #[test]
    fn test_mode_from_str_round_trips_as_str() {
        for mode in [SearchMode::Exact, SearchMode::UpTo] {
            assert_eq!(mode.as_str().parse::<SearchMode>(), Ok(mode));
        }
        assert!("both".parse::<SearchMode>().is_err());
    }
}
