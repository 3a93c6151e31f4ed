//! Index → candidate mapping.
//!
//! A candidate of length `L` over a charset of `B` characters is the `L`-digit,
//! base-`B` representation of its index, most significant digit first.  With
//! the charset `"ab"` and `L = 2`:
//!
//! ```text
//! index 0 → "aa"    index 1 → "ab"    index 2 → "ba"    index 3 → "bb"
//! ```
//!
//! This is a bijection between `[0, B^L)` and all length-`L` strings, and it
//! walks them in lexicographic order under the charset's own ordering.
//!
//! Indices are `u128`.  `B^L` outgrows any fixed width eventually (the
//! reference charset overflows `u128` at `L = 20`), so the space size is
//! always computed with checked arithmetic and an oversized space is an error
//! rather than a silent wrap-around.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::domain::charset::Charset;

/// The requested search space cannot be indexed with `u128`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("search space over {base} symbols up to length {length} does not fit in 128 bits")]
pub struct SpaceTooLarge {
    pub base: usize,
    pub length: usize,
}

/// Number of candidates of exactly `length` characters over `base` symbols.
///
/// Returns `None` if the count does not fit in `u128`.
pub fn search_space_size(base: usize, length: usize) -> Option<u128> {
    let exp = u32::try_from(length).ok()?;
    (base as u128).checked_pow(exp)
}

/// Returns the candidate at `index` among all strings of `length` characters.
///
/// Digits beyond `length` are ignored, so callers must keep `index` below
/// `search_space_size(charset.len(), length)` to get a bijection.
///
/// # Examples
///
/// ```rust
/// use crack_core::Charset;
/// use crack_core::search::enumerator::candidate_at;
///
/// let cs = Charset::new("ab").unwrap();
/// assert_eq!(candidate_at(2, &cs, 2), "ba");
/// ```
pub fn candidate_at(index: u128, charset: &Charset, length: usize) -> String {
    let base = charset.len() as u128;
    let mut digits = vec![charset.first(); length];
    let mut rest = index;
    for slot in digits.iter_mut().rev() {
        *slot = charset.at((rest % base) as usize);
        rest /= base;
    }
    digits.into_iter().collect()
}

/// Iterator over every candidate of the given lengths, shortest lengths
/// first, indices increasing within a length.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    charset: &'a Charset,
    lengths: RangeInclusive<usize>,
    length: usize,
    space: u128,
    next_index: u128,
}

impl<'a> Candidates<'a> {
    /// Prepares the enumeration.
    ///
    /// Every length in `lengths` is checked up front so the iterator never
    /// stops halfway because a later length turned out unsearchable.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceTooLarge`] for the first length whose space, or whose
    /// running total over all lengths so far, overflows.
    pub fn new(charset: &'a Charset, lengths: RangeInclusive<usize>) -> Result<Self, SpaceTooLarge> {
        lengths.clone().try_fold(0u128, |total, length| {
            search_space_size(charset.len(), length)
                .and_then(|space| total.checked_add(space))
                .ok_or(SpaceTooLarge {
                    base: charset.len(),
                    length,
                })
        })?;

        let mut lengths = lengths;
        let (length, space) = match lengths.next() {
            Some(l) => (l, search_space_size(charset.len(), l).unwrap_or(0)),
            None => (0, 0),
        };

        Ok(Self {
            charset,
            lengths,
            length,
            space,
            next_index: 0,
        })
    }

    /// Total number of candidates this iterator will yield.
    ///
    /// Bounded by the total checked in [`Candidates::new`], so it never wraps.
    pub fn total(&self) -> u128 {
        self.lengths
            .clone()
            .map(|l| search_space_size(self.charset.len(), l).unwrap_or(0))
            .fold(self.space - self.next_index, u128::saturating_add)
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.next_index >= self.space {
            self.length = self.lengths.next()?;
            self.space = search_space_size(self.charset.len(), self.length)?;
            self.next_index = 0;
        }
        let candidate = candidate_at(self.next_index, self.charset, self.length);
        self.next_index += 1;
        Some(candidate)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ab() -> Charset {
        Charset::new("ab").unwrap()
    }

    #[test]
    fn test_space_size_small() {
        assert_eq!(search_space_size(2, 3), Some(8));
        assert_eq!(search_space_size(79, 3), Some(493_039));
        assert_eq!(search_space_size(94, 3), Some(830_584));
    }

    #[test]
    fn test_space_size_overflow_is_none() {
        assert_eq!(search_space_size(94, 19).map(|_| ()), Some(()));
        assert_eq!(search_space_size(94, 20), None);
    }

    #[test]
    fn test_space_size_length_zero_is_one() {
        assert_eq!(search_space_size(10, 0), Some(1));
    }

    #[test]
    fn test_first_and_last_index() {
        let cs = Charset::new("xyz").unwrap();
        assert_eq!(candidate_at(0, &cs, 4), "xxxx");
        assert_eq!(candidate_at(3u128.pow(4) - 1, &cs, 4), "zzzz");
    }

    #[test]
    fn test_two_letter_order() {
        let cs = ab();
        let all: Vec<String> = (0..4).map(|i| candidate_at(i, &cs, 2)).collect();
        assert_eq!(all, ["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_bijection_and_lexicographic_successor() {
        // Exhaustive over a small space: every index maps to a distinct string,
        // and each successor is the next string under the charset's order.
        let cs = Charset::new("q1#").unwrap();
        let length = 4;
        let space = search_space_size(cs.len(), length).unwrap();

        let rank = |s: &str| -> Vec<usize> { s.chars().map(|c| cs.position(c).unwrap()).collect() };

        let mut seen = HashSet::new();
        let mut previous: Option<Vec<usize>> = None;
        for idx in 0..space {
            let cand = candidate_at(idx, &cs, length);
            assert_eq!(cand.chars().count(), length);
            assert!(seen.insert(cand.clone()), "duplicate candidate {cand}");
            let r = rank(&cand);
            if let Some(prev) = previous {
                assert!(prev < r, "{cand} is not after its predecessor");
            }
            previous = Some(r);
        }
        assert_eq!(seen.len() as u128, space);
    }

    #[test]
    fn test_reference_charset_last_candidate() {
        let cs = Charset::reference();
        let space = search_space_size(cs.len(), 3).unwrap();
        assert_eq!(candidate_at(space - 1, &cs, 3), "~~~");
        assert_eq!(candidate_at(0, &cs, 3), "aaa");
    }

    #[test]
    fn test_candidates_single_length() {
        let cs = ab();
        let all: Vec<String> = Candidates::new(&cs, 2..=2).unwrap().collect();
        assert_eq!(all, ["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_candidates_up_to_length_shortest_first() {
        let cs = ab();
        let all: Vec<String> = Candidates::new(&cs, 1..=2).unwrap().collect();
        assert_eq!(all, ["a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_candidates_total_counts_every_length() {
        let cs = Charset::new("abc").unwrap();
        let mut it = Candidates::new(&cs, 1..=3).unwrap();
        assert_eq!(it.total(), 3 + 9 + 27);
        it.next();
        assert_eq!(it.total(), 3 + 9 + 27 - 1);
    }

    #[test]
    fn test_candidates_rejects_overflowing_length() {
        let cs = Charset::reference();
        let err = Candidates::new(&cs, 18..=21).unwrap_err();
        assert_eq!(err, SpaceTooLarge { base: 94, length: 20 });
    }

    #[test]
    fn test_candidates_rejects_overflowing_sum_of_lengths() {
        // Arrange: 5^55 alone fits in u128, 5^1 + ... + 5^55 does not.
        let cs = Charset::new("abcde").unwrap();
        assert!(search_space_size(5, 55).is_some());

        // Act
        let err = Candidates::new(&cs, 1..=55).unwrap_err();

        // Assert
        assert_eq!(err, SpaceTooLarge { base: 5, length: 55 });
        assert!(Candidates::new(&cs, 1..=54).is_ok());
    }
}
