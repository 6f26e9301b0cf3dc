//! Document text backed by a rope.
//!
//! All offsets are char indices. Every mutation goes through `insert` or
//! `delete` so the history sees it; loading a new document with `set_text`
//! is the one exception and starts a fresh history.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

use crate::history::{Edit, EditKind, History};
use crate::{BufferError, BufferResult, Position};

/// Default number of undo steps kept per buffer.
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

/// The text of one document plus its undo history and dirty flag.
///
/// `TextBuffer` is `Send` but is meant to be owned by a single window's
/// session; there is no interior mutability.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    history: History,
    /// Set by any edit, cleared by `set_text` and `mark_saved`
    modified: bool,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use quill_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_undo_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Creates an empty buffer keeping at most `undo_limit` undo steps.
    pub fn with_undo_limit(undo_limit: usize) -> Self {
        Self {
            rope: Rope::new(),
            history: History::new(undo_limit),
            modified: false,
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text.
    ///
    /// Borrowed when the rope is a single chunk, allocated otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Iterates the chars of `range`, which must lie inside the text.
    pub(crate) fn chars_in(&self, range: Range<usize>) -> ropey::iter::Chars<'_> {
        self.rope.slice(range).chars()
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Document length in chars.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    // ==================== Mutations ====================

    /// Replaces the whole document, e.g. after loading a file. Clears the
    /// history and the dirty flag.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.history.clear();
        self.modified = false;
    }

    /// Inserts text at a char index.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        if text.is_empty() {
            return Ok(());
        }

        self.history.push(Edit::insert(char_idx, text));
        self.rope.insert(char_idx, text);
        self.modified = true;
        Ok(())
    }

    /// Deletes a char range, returning the removed text.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        self.check_range(&range)?;
        let deleted: String = self.rope.slice(range.clone()).into();
        if deleted.is_empty() {
            return Ok(deleted);
        }

        self.history.push(Edit::delete(range.start, deleted.clone()));
        self.rope.remove(range);
        self.modified = true;
        Ok(deleted)
    }

    /// Replaces a char range with new text as one undo step.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> BufferResult<String> {
        self.check_range(&range)?;
        self.history.begin_group();
        let result = self
            .delete(range.clone())
            .and_then(|deleted| self.insert(range.start, text).map(|_| deleted));
        self.history.end_group();
        result
    }

    /// Replaces every literal occurrence of `pattern` with `replacement`.
    ///
    /// Matching is exact and case-sensitive; occurrences are taken
    /// left-to-right without overlap, as `str::replace` does. The whole
    /// operation is a single undo step. Returns the number of replacements;
    /// an empty pattern replaces nothing.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> usize {
        if pattern.is_empty() {
            return 0;
        }

        let matches = self.find_all(pattern);
        if matches.is_empty() {
            return 0;
        }

        let pattern_len = pattern.chars().count();
        self.history.begin_group();
        // Back to front so earlier offsets stay valid
        for &start in matches.iter().rev() {
            let range = start..start + pattern_len;
            let deleted: String = self.rope.slice(range.clone()).into();
            self.history.push(Edit::delete(start, deleted));
            self.rope.remove(range);
            if !replacement.is_empty() {
                self.history.push(Edit::insert(start, replacement));
                self.rope.insert(start, replacement);
            }
        }
        self.history.end_group();
        self.modified = true;

        matches.len()
    }

    /// Brings the buffer in line with `text`, recording only the changed
    /// span.
    ///
    /// The UI widget owns the text while the user types; this diffs its
    /// contents against the buffer by common prefix and suffix and applies
    /// the middle as a delete and/or insert. Returns `false` when nothing
    /// changed.
    pub fn sync_to(&mut self, text: &str) -> BufferResult<bool> {
        let old: Vec<char> = self.rope.chars().collect();
        let new: Vec<char> = text.chars().collect();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let old_end = old.len() - suffix;
        let new_end = new.len() - suffix;
        if prefix == old_end && prefix == new_end {
            return Ok(false);
        }

        let inserted: String = new[prefix..new_end].iter().collect();
        if prefix < old_end && !inserted.is_empty() {
            self.replace(prefix..old_end, &inserted)?;
        } else if prefix < old_end {
            self.delete(prefix..old_end)?;
        } else {
            self.insert(prefix, &inserted)?;
        }
        Ok(true)
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last undo step.
    pub fn undo(&mut self) -> BufferResult<()> {
        let edits = self.history.undo().ok_or(BufferError::NothingToUndo)?;
        for edit in edits.iter().rev() {
            self.apply(edit, true);
        }
        self.modified = true;
        Ok(())
    }

    /// Redoes the last undone step.
    pub fn redo(&mut self) -> BufferResult<()> {
        let edits = self.history.redo().ok_or(BufferError::NothingToRedo)?;
        for edit in &edits {
            self.apply(edit, false);
        }
        self.modified = true;
        Ok(())
    }

    /// Applies an edit (or its inverse) without recording it.
    fn apply(&mut self, edit: &Edit, inverse: bool) {
        let end = edit.position + edit.len_chars();
        match (edit.kind, inverse) {
            (EditKind::Insert, false) | (EditKind::Delete, true) => {
                self.rope.insert(edit.position, &edit.content);
            }
            (EditKind::Insert, true) | (EditKind::Delete, false) => {
                self.rope.remove(edit.position..end);
            }
        }
    }

    // ==================== Position Conversion ====================

    /// Converts a char index to the line:column the text area shows it at.
    ///
    /// Lines end at `\n`, `\r\n`, `\n\r` or a lone `\r`, the breaks the text
    /// area splits on. Form feeds, vertical tabs and the Unicode line and
    /// paragraph separators stay inside their line, unlike ropey's own line
    /// indexing.
    pub fn char_idx_to_position(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        let mut position = Position::default();
        let mut ending = None;
        for c in self.chars_in(0..char_idx) {
            match (c, ending.take()) {
                // second half of a two-char line ending
                ('\n', Some('\r')) | ('\r', Some('\n')) => {}
                ('\n' | '\r', _) => {
                    position.line += 1;
                    position.column = 0;
                    ending = Some(c);
                }
                _ => position.column += 1,
            }
        }
        Ok(position)
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer changed since it was loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the dirty flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Char offsets of every non-overlapping literal occurrence.
    pub fn find_all(&self, pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let text = self.text();
        let mut offsets = Vec::new();
        let mut chars_before = 0;
        let mut last_byte = 0;
        for (byte_idx, _) in text.match_indices(pattern) {
            chars_before += text[last_byte..byte_idx].chars().count();
            offsets.push(chars_before);
            last_byte = byte_idx;
        }
        offsets
    }

    fn check_range(&self, range: &Range<usize>) -> BufferResult<()> {
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        if range.start > range.end {
            return Err(BufferError::InvalidCharIndex(range.start));
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            history: History::new(DEFAULT_UNDO_LIMIT),
            modified: false,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
