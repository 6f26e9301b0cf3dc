//! Undo/redo history.
//!
//! Edits are recorded as insert/delete commands and collected into groups.
//! One group is one undo step: rapid adjacent keystrokes coalesce into the
//! current group, and compound operations such as replace-all open an
//! explicit group so they undo in a single step.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// The type of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Text was inserted
    Insert,
    /// Text was deleted
    Delete,
}

/// A single edit operation, positioned in chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: EditKind,
    /// Character position where the edit occurred
    pub position: usize,
    /// The text that was inserted or deleted
    pub content: String,
}

impl Edit {
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            content: content.into(),
        }
    }

    pub fn delete(position: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            content: content.into(),
        }
    }

    /// Length of the edited text in chars.
    pub fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    /// Returns true if `next` continues this edit as part of the same
    /// typing run.
    ///
    /// Inserts coalesce when `next` starts where this one ends; deletes
    /// coalesce for both backspace and forward-delete runs. Newlines
    /// always start a new step.
    pub fn can_coalesce(&self, next: &Edit) -> bool {
        if self.kind != next.kind {
            return false;
        }
        if self.content.contains('\n') || next.content.contains('\n') {
            return false;
        }

        match self.kind {
            EditKind::Insert => self.position + self.len_chars() == next.position,
            EditKind::Delete => {
                next.position + next.len_chars() == self.position
                    || self.position == next.position
            }
        }
    }

    /// Merges `next` into this edit. Callers check `can_coalesce` first.
    pub fn coalesce(&mut self, next: Edit) {
        match self.kind {
            EditKind::Insert => self.content.push_str(&next.content),
            EditKind::Delete => {
                if next.position < self.position {
                    // Backspace run
                    self.content = next.content + &self.content;
                    self.position = next.position;
                } else {
                    self.content.push_str(&next.content);
                }
            }
        }
    }
}

/// Edits undone and redone together.
#[derive(Debug, Clone)]
pub struct EditGroup {
    /// Edits in the order they were applied
    pub edits: Vec<Edit>,
    /// Last time an edit joined the group; `None` seals the group
    timestamp: Option<Instant>,
}

impl EditGroup {
    fn new(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            timestamp: Some(Instant::now()),
        }
    }

    fn sealed(edits: Vec<Edit>) -> Self {
        Self {
            edits,
            timestamp: None,
        }
    }
}

/// Bounded undo/redo history.
///
/// `VecDeque` lets the oldest group fall off the front once `max_size`
/// groups are stored.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<EditGroup>,
    redo_stack: Vec<EditGroup>,
    max_size: usize,
    coalesce_threshold: Duration,
    /// Open explicit group (`begin_group` .. `end_group`)
    group: Option<Vec<Edit>>,
}

impl History {
    /// Creates a new history keeping at most `max_size` undo steps.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            coalesce_threshold: Duration::from_millis(300),
            group: None,
        }
    }

    /// Records an edit. Clears the redo stack.
    pub fn push(&mut self, edit: Edit) {
        self.redo_stack.clear();

        if let Some(group) = self.group.as_mut() {
            group.push(edit);
            return;
        }

        if let Some(last_group) = self.undo_stack.back_mut() {
            if let Some(timestamp) = last_group.timestamp {
                if timestamp.elapsed() < self.coalesce_threshold {
                    if let Some(last_edit) = last_group.edits.last_mut() {
                        if last_edit.can_coalesce(&edit) {
                            last_edit.coalesce(edit);
                            last_group.timestamp = Some(Instant::now());
                            return;
                        }
                    }
                }
            }
        }

        self.push_group(EditGroup::new(edit));
    }

    /// Starts a compound edit. Everything pushed until `end_group` is one
    /// undo step. Nested calls are flattened into the outer group.
    pub fn begin_group(&mut self) {
        if self.group.is_none() {
            self.group = Some(Vec::new());
        }
    }

    /// Closes the compound edit opened by `begin_group`.
    pub fn end_group(&mut self) {
        if let Some(edits) = self.group.take() {
            if !edits.is_empty() {
                self.push_group(EditGroup::sealed(edits));
            }
        }
    }

    /// Pops the most recent undo step.
    ///
    /// Returns the group's edits in application order; the caller reverses
    /// them back-to-front.
    pub fn undo(&mut self) -> Option<Vec<Edit>> {
        let group = self.undo_stack.pop_back()?;
        self.redo_stack.push(EditGroup::sealed(group.edits.clone()));
        Some(group.edits)
    }

    /// Pops the most recently undone step, returning its edits in
    /// application order.
    pub fn redo(&mut self) -> Option<Vec<Edit>> {
        let group = self.redo_stack.pop()?;
        self.undo_stack
            .push_back(EditGroup::sealed(group.edits.clone()));
        Some(group.edits)
    }

    #[cfg(test)]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[cfg(test)]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drops all history, e.g. after loading a new file.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.group = None;
    }

    #[cfg(test)]
    fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    fn push_group(&mut self, group: EditGroup) {
        self.undo_stack.push_back(group);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_single_edits() {
        let mut history = History::new(100);

        history.push(Edit::insert(0, "a"));
        history.push(Edit::insert(5, "b"));

        assert_eq!(history.undo_count(), 2);
        let edits = history.undo().unwrap();
        assert_eq!(edits, vec![Edit::insert(5, "b")]);

        assert!(history.can_redo());
        let edits = history.redo().unwrap();
        assert_eq!(edits[0].content, "b");
    }

    #[test]
    fn test_typing_run_coalesces() {
        let mut history = History::new(100);
        history.push(Edit::insert(0, "a"));
        history.push(Edit::insert(1, "b"));
        history.push(Edit::insert(2, "c"));

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo().unwrap(), vec![Edit::insert(0, "abc")]);
    }

    #[test]
    fn test_backspace_run_coalesces() {
        let mut e1 = Edit::delete(4, "d");
        let e2 = Edit::delete(3, "c");

        assert!(e1.can_coalesce(&e2));
        e1.coalesce(e2);
        assert_eq!(e1, Edit::delete(3, "cd"));
    }

    #[test]
    fn test_newline_starts_new_step() {
        let e1 = Edit::insert(0, "a");
        assert!(!e1.can_coalesce(&Edit::insert(1, "\n")));
    }

    #[test]
    fn test_explicit_group_is_one_step() {
        let mut history = History::new(100);
        history.begin_group();
        history.push(Edit::delete(0, "a"));
        history.push(Edit::insert(0, "b"));
        history.push(Edit::delete(2, "a"));
        history.push(Edit::insert(2, "b"));
        history.end_group();

        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.undo().unwrap().len(), 4);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_empty_group_records_nothing() {
        let mut history = History::new(100);
        history.begin_group();
        history.end_group();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = History::new(100);
        history.push(Edit::insert(0, "a"));
        history.undo();
        assert!(history.can_redo());

        history.push(Edit::insert(0, "b"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::new(2);
        for i in 0..5 {
            history.begin_group();
            history.push(Edit::insert(i, "x"));
            history.end_group();
        }
        assert_eq!(history.undo_count(), 2);
    }
}
