//! Ordered candidate alphabet.
//!
//! A [`Charset`] is the ordered list of distinct characters every candidate is
//! drawn from.  Its order defines the enumeration order: index 0 is the first
//! character, so the first candidate of any length is that character repeated.
//!
//! The reference deployment uses [`REFERENCE_CHARSET`], every printable
//! non-space ASCII character.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// The alphabet used by the reference deployment: lower case, upper case,
/// then the printable ASCII punctuation and digits in code-point order.
/// Space is not included.  94 characters.
pub const REFERENCE_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./0123456789:;<=>?@[\\]^_`{|}~";

/// Reasons a string cannot be used as a charset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("charset is empty")]
    Empty,

    #[error("charset contains duplicate character {0:?}")]
    Duplicate(char),
}

/// An ordered sequence of distinct characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    /// Builds a charset, rejecting empty input and repeated characters.
    ///
    /// # Errors
    ///
    /// Returns [`CharsetError::Empty`] or [`CharsetError::Duplicate`] (naming
    /// the first repeated character).
    pub fn new(chars: &str) -> Result<Self, CharsetError> {
        if chars.is_empty() {
            return Err(CharsetError::Empty);
        }
        let mut seen = HashSet::new();
        for c in chars.chars() {
            if !seen.insert(c) {
                return Err(CharsetError::Duplicate(c));
            }
        }
        Ok(Self {
            chars: chars.chars().collect(),
        })
    }

    /// The reference charset.
    pub fn reference() -> Self {
        Self {
            chars: REFERENCE_CHARSET.chars().collect(),
        }
    }

    /// Number of characters, i.e. the radix of the enumeration.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false` for a constructed charset.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at position `digit`.  Panics if out of range, which the
    /// enumerator rules out by construction.
    pub fn at(&self, digit: usize) -> char {
        self.chars[digit]
    }

    pub fn first(&self) -> char {
        self.chars[0]
    }

    /// Position of `c`, if present.
    pub fn position(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&x| x == c)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
