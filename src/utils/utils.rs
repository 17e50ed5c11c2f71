//! Utility functions for pyim dictionary processing.
//!
//! This module provides:
//! - The segment-wise phonetic key order used when sorting pyim lines
//! - Splitting a pyim line into its key and target
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use scel2pyim::utils::phonetic_key_compare;
//!
//! // Syllables are compared one by one, so "a" < "ab" decides here.
//! assert_eq!(phonetic_key_compare("a-bb", "ab-b"), Ordering::Less);
//! // A flat comparison puts "a'b" first because '\'' < '-'; by syllables
//! // "a" is a prefix of "a'b" and wins.
//! assert!("a'b" < "a-b");
//! assert_eq!(phonetic_key_compare("a-b", "a'b"), Ordering::Less);
//! ```

use std::cmp::Ordering;

use crate::storage::SYLLABLE_SEPARATOR;

/// Compares two phonetic keys syllable by syllable.
///
/// Syllables are compared as byte strings and the first difference decides.
/// When one key runs out of syllables first, it sorts first.
pub fn phonetic_key_compare(first: &str, second: &str) -> Ordering {
    first
        .split(SYLLABLE_SEPARATOR)
        .cmp(second.split(SYLLABLE_SEPARATOR))
}

/// Splits a pyim line at its first space into `(key, target)`.
///
/// Returns `None` for lines without a space.
#[inline]
pub fn split_pyim_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(' ')
}

/// Key part of a pyim line; the whole line when there is no space.
#[inline]
pub fn pyim_line_key(line: &str) -> &str {
    split_pyim_line(line).map_or(line, |(key, _)| key)
}
