//! Literal text search over the buffer.
//!
//! `TextSearchEngine` is the primitive the search controller drives: find
//! one occurrence of a term inside a char range, honouring case, whole-word
//! and direction flags. Matching is a plain char-by-char scan; there is no
//! regex support.

use bitflags::bitflags;
use std::ops::Range;

use crate::TextBuffer;

bitflags! {
    /// Options for a single search call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FindFlags: u8 {
        /// Compare chars exactly instead of by lowercase folding
        const MATCH_CASE = 1 << 0;
        /// Reject matches touching a word char on either side
        const WHOLE_WORD = 1 << 1;
        /// Return the last match in the range instead of the first
        const REVERSE = 1 << 2;
    }
}

impl FindFlags {
    /// Maps the two search toggles and the direction onto a flag set.
    ///
    /// Each input contributes exactly one bit, so all eight combinations
    /// resolve to distinct flag sets.
    pub fn resolve(case_sensitive: bool, whole_word: bool, reverse: bool) -> Self {
        let mut flags = FindFlags::empty();
        flags.set(FindFlags::MATCH_CASE, case_sensitive);
        flags.set(FindFlags::WHOLE_WORD, whole_word);
        flags.set(FindFlags::REVERSE, reverse);
        flags
    }
}

/// A located occurrence, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchMatch {
    pub start: usize,
    pub len: usize,
}

impl SearchMatch {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Offset just past the match.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Substring search capability of a text container.
pub trait TextSearchEngine {
    /// Length of the searchable text in chars.
    fn search_len(&self) -> usize;

    /// Finds `term` lying entirely inside `range`.
    ///
    /// Returns the char offset of the first match, or of the last one when
    /// `flags` contains `REVERSE`. `range` is clamped to the text. An empty
    /// term never matches.
    fn find(&self, term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize>;

    fn find_forward(&self, term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize> {
        self.find(term, range, flags.difference(FindFlags::REVERSE))
    }

    fn find_backward(&self, term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize> {
        self.find(term, range, flags.union(FindFlags::REVERSE))
    }
}

impl TextSearchEngine for TextBuffer {
    fn search_len(&self) -> usize {
        self.len_chars()
    }

    fn find(&self, term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize> {
        let (window, inner) = context_window(range, self.len_chars());
        let haystack: Vec<char> = self.chars_in(window.clone()).collect();
        find_term(&haystack, term, inner, flags).map(|pos| pos + window.start)
    }
}

impl TextSearchEngine for str {
    fn search_len(&self) -> usize {
        self.chars().count()
    }

    fn find(&self, term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize> {
        let (window, inner) = context_window(range, self.search_len());
        let haystack: Vec<char> = self.chars().skip(window.start).take(window.len()).collect();
        find_term(&haystack, term, inner, flags).map(|pos| pos + window.start)
    }
}

/// Clamps `range` to `len` and widens it by one char on each side, so
/// whole-word checks at its edges still see their neighbours. Returns the
/// widened range and the clamped range relative to it.
fn context_window(range: Range<usize>, len: usize) -> (Range<usize>, Range<usize>) {
    let end = range.end.min(len);
    let start = range.start.min(end);
    let window = start.saturating_sub(1)..(end + 1).min(len);
    let inner = start - window.start..end - window.start;
    (window, inner)
}

fn find_term(haystack: &[char], term: &str, range: Range<usize>, flags: FindFlags) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    let needle: Vec<char> = term.chars().collect();
    find_in_chars(haystack, &needle, range, flags)
}

/// Returns true for chars that make up a word.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scans `haystack[range]` for `needle`.
///
/// Whole-word boundaries are checked against the full haystack, so a match
/// at the edge of `range` still sees the chars just outside it.
pub fn find_in_chars(
    haystack: &[char],
    needle: &[char],
    range: Range<usize>,
    flags: FindFlags,
) -> Option<usize> {
    let end = range.end.min(haystack.len());
    let start = range.start.min(end);
    if needle.is_empty() || end - start < needle.len() {
        return None;
    }

    let last_start = end - needle.len();
    let matches_at = |pos: usize| {
        matches_chars(&haystack[pos..pos + needle.len()], needle, flags)
            && (!flags.contains(FindFlags::WHOLE_WORD)
                || is_word_bounded(haystack, pos, pos + needle.len()))
    };

    if flags.contains(FindFlags::REVERSE) {
        (start..=last_start).rev().find(|&pos| matches_at(pos))
    } else {
        (start..=last_start).find(|&pos| matches_at(pos))
    }
}

fn matches_chars(candidate: &[char], needle: &[char], flags: FindFlags) -> bool {
    if flags.contains(FindFlags::MATCH_CASE) {
        candidate == needle
    } else {
        candidate
            .iter()
            .zip(needle)
            .all(|(&a, &b)| a == b || fold(a) == fold(b))
    }
}

/// Simple one-to-one lowercase folding, keeping match lengths in chars
/// equal to the term's length.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn is_word_bounded(haystack: &[char], start: usize, end: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|i| haystack.get(i))
        .is_some_and(|&c| is_word_char(c));
    let after = haystack.get(end).is_some_and(|&c| is_word_char(c));
    !before && !after
}
