//! Per-window editor state.
//!
//! An `EditorSession` owns everything one window edits: the document, the
//! file it came from, the search cursors and the find/replace bars.
//! Sessions share nothing, so each window behaves like its own editor.

use quill_buffer::{FileStore, Position, SearchMatch, TextBuffer};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::panels::Panels;
use crate::search::{SearchController, SearchOptions, SearchOutcome};
use crate::{CoreError, CoreResult};

/// Name shown for a document that was never saved.
pub const UNTITLED: &str = "Untitled";

/// Application name used in window titles.
pub const APP_NAME: &str = "Quill";

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What closing the window needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    /// Nothing unsaved; close now
    Close,
    /// Unsaved changes; ask the user first
    Confirm,
}

/// The user's answer to "There are unsaved changes. Do you want to exit?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAnswer {
    Yes,
    No,
    Cancel,
}

/// One window's document and editing state.
#[derive(Debug)]
pub struct EditorSession {
    id: SessionId,
    buffer: TextBuffer,
    path: Option<PathBuf>,
    files: FileStore,
    search: SearchController,
    search_options: SearchOptions,
    panels: Panels,
}

impl EditorSession {
    /// An empty, untitled session.
    pub fn new() -> Self {
        Self::with_buffer(TextBuffer::new())
    }

    /// An empty session using the configured undo limit.
    pub fn from_config(config: &Config) -> Self {
        Self::with_buffer(TextBuffer::with_undo_limit(config.editor.undo_limit))
    }

    fn with_buffer(buffer: TextBuffer) -> Self {
        let search = SearchController::new(buffer.len_chars());
        Self {
            id: SessionId::new(),
            buffer,
            path: None,
            files: FileStore::new(),
            search,
            search_options: SearchOptions::default(),
            panels: Panels::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut Panels {
        &mut self.panels
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn search_options(&self) -> SearchOptions {
        self.search_options
    }

    pub fn set_search_options(&mut self, options: SearchOptions) {
        self.search_options = options;
    }

    // ==================== Files ====================

    /// Replaces the document with the file at `path`.
    ///
    /// On failure the document, path and history are left as they were.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let text = self.files.read_text_file(path)?;
        self.buffer.set_text(&text);
        self.path = Some(path.to_path_buf());
        self.search.reset(self.buffer.len_chars());
        tracing::info!("Session {} opened {}", self.id, path.display());
        Ok(())
    }

    /// Writes the document back to its file.
    pub fn save(&mut self) -> CoreResult<()> {
        let path = self.path.clone().ok_or(CoreError::NoPath)?;
        self.files.save_text_file(&path, &self.buffer.text())?;
        self.buffer.mark_saved();
        tracing::info!("Session {} saved {}", self.id, path.display());
        Ok(())
    }

    /// Writes the document to `path` and makes it the document's file.
    ///
    /// The path only changes if the write succeeds.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        self.files.save_text_file(path, &self.buffer.text())?;
        self.path = Some(path.to_path_buf());
        self.buffer.mark_saved();
        tracing::info!("Session {} saved as {}", self.id, path.display());
        Ok(())
    }

    /// Display name of the document's file.
    pub fn file_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Window title, marked with `*` while there are unsaved changes.
    pub fn title(&self) -> String {
        let dirty = if self.is_dirty() { "*" } else { "" };
        format!("{}{} - {}", self.file_name(), dirty, APP_NAME)
    }

    // ==================== Editing ====================

    /// Folds the text area's current contents into the document.
    ///
    /// Returns whether anything changed.
    pub fn apply_widget_text(&mut self, text: &str) -> CoreResult<bool> {
        let changed = self.buffer.sync_to(text)?;
        if changed {
            self.search.clamp(self.buffer.len_chars());
        }
        Ok(changed)
    }

    pub fn undo(&mut self) -> CoreResult<()> {
        self.buffer.undo()?;
        self.search.clamp(self.buffer.len_chars());
        Ok(())
    }

    pub fn redo(&mut self) -> CoreResult<()> {
        self.buffer.redo()?;
        self.search.clamp(self.buffer.len_chars());
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_modified()
    }

    // ==================== Search ====================

    /// Find next with the session's toggles.
    pub fn find_next(&mut self, term: &str) -> SearchOutcome {
        self.search
            .find_next(&self.buffer, term, self.search_options)
    }

    /// Find previous with the session's toggles.
    pub fn find_previous(&mut self, term: &str) -> SearchOutcome {
        self.search
            .find_previous(&self.buffer, term, self.search_options)
    }

    /// Replaces every exact occurrence of `old` with `new`.
    pub fn replace_all(&mut self, old: &str, new: &str) -> usize {
        self.search.replace_all(&mut self.buffer, old, new)
    }

    /// Line/column where a match starts, for selecting it in the text area.
    pub fn match_position(&self, found: SearchMatch) -> CoreResult<Position> {
        Ok(self.buffer.char_idx_to_position(found.start)?)
    }

    // ==================== Closing ====================

    /// Decides whether closing needs confirmation.
    pub fn request_close(&self) -> CloseRequest {
        if self.is_dirty() {
            CloseRequest::Confirm
        } else {
            CloseRequest::Close
        }
    }

    /// Applies the answer to the exit prompt. Only `Yes` closes.
    pub fn resolve_close(&self, answer: ExitAnswer) -> bool {
        let close = answer == ExitAnswer::Yes;
        tracing::debug!("Session {} exit answer {:?}", self.id, answer);
        close
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Bar;

    #[test]
    fn test_new_session_is_clean_and_untitled() {
        let session = EditorSession::new();
        assert!(!session.is_dirty());
        assert_eq!(session.title(), "Untitled - Quill");
        assert_eq!(session.request_close(), CloseRequest::Close);
        assert_eq!(session.panels().open_bar(), None);
    }

    #[test]
    fn test_open_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut session = EditorSession::new();
        session.open(&path).unwrap();
        assert_eq!(session.buffer().text(), "hello");
        assert_eq!(session.title(), "notes.txt - Quill");

        session.apply_widget_text("hello world").unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.title(), "notes.txt* - Quill");

        session.save().unwrap();
        assert!(!session.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");
    }

    #[test]
    fn test_failed_open_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new();
        session.apply_widget_text("draft").unwrap();

        let result = session.open(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(CoreError::File(_))));
        assert_eq!(session.buffer().text(), "draft");
        assert!(session.path().is_none());

        let valid = dir.path().join("ok.txt");
        std::fs::write(&valid, "ok").unwrap();
        session.open(&valid).unwrap();
        assert_eq!(session.buffer().text(), "ok");
    }

    #[test]
    fn test_save_without_path() {
        let mut session = EditorSession::new();
        assert!(matches!(session.save(), Err(CoreError::NoPath)));
    }

    #[test]
    fn test_save_as_sets_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut session = EditorSession::new();
        session.apply_widget_text("text").unwrap();
        session.save_as(&path).unwrap();

        assert_eq!(session.path(), Some(path.as_path()));
        assert!(!session.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "text");
    }

    #[test]
    fn test_failed_save_as_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new();
        session.apply_widget_text("text").unwrap();

        let bad = dir.path().join("no").join("such").join("dir.txt");
        assert!(session.save_as(&bad).is_err());
        assert!(session.path().is_none());
        assert!(session.is_dirty());
    }

    #[test]
    fn test_exit_confirmation_only_closes_on_yes() {
        let mut session = EditorSession::new();
        session.apply_widget_text("unsaved").unwrap();
        assert_eq!(session.request_close(), CloseRequest::Confirm);

        assert!(session.resolve_close(ExitAnswer::Yes));
        assert!(!session.resolve_close(ExitAnswer::No));
        assert!(!session.resolve_close(ExitAnswer::Cancel));
    }

    #[test]
    fn test_search_uses_session_toggles() {
        let mut session = EditorSession::new();
        session.apply_widget_text("Cat cat").unwrap();

        assert_eq!(session.find_next("cat").matched().map(|m| m.start), Some(0));

        let mut session = EditorSession::new();
        session.apply_widget_text("Cat cat").unwrap();
        session.set_search_options(SearchOptions::new(true, false));
        assert_eq!(session.find_next("cat").matched().map(|m| m.start), Some(4));
    }

    #[test]
    fn test_match_position() {
        let mut session = EditorSession::new();
        session.apply_widget_text("one\ntwo\nthree").unwrap();
        let found = session.find_next("three").matched().unwrap();
        assert_eq!(session.match_position(found).unwrap(), Position::new(2, 0));
    }

    #[test]
    fn test_match_position_follows_text_area_lines() {
        let mut session = EditorSession::new();
        session.apply_widget_text("page one\u{0C}target").unwrap();
        let found = session.find_next("target").matched().unwrap();
        assert_eq!(session.match_position(found).unwrap(), Position::new(0, 9));

        let mut session = EditorSession::new();
        let long_line = "word ".repeat(60);
        session
            .apply_widget_text(&format!("{long_line}\ntarget"))
            .unwrap();
        let found = session.find_next("target").matched().unwrap();
        assert_eq!(session.match_position(found).unwrap(), Position::new(1, 0));
    }

    #[test]
    fn test_edits_clamp_search_cursors() {
        let mut session = EditorSession::new();
        session.apply_widget_text("abc abc abc").unwrap();
        session.find_next("abc");
        session.find_next("abc");
        session.find_next("abc");

        session.apply_widget_text("abc").unwrap();
        assert!(session.search().state().forward_pos <= 3);
        assert_eq!(session.find_next("abc").matched().map(|m| m.start), Some(0));
    }

    #[test]
    fn test_replace_all_then_undo() {
        let mut session = EditorSession::new();
        session.apply_widget_text("banana").unwrap();
        assert_eq!(session.replace_all("a", "b"), 3);
        assert_eq!(session.buffer().text(), "bbnbnb");

        session.undo().unwrap();
        assert_eq!(session.buffer().text(), "banana");
        session.redo().unwrap();
        assert_eq!(session.buffer().text(), "bbnbnb");
    }

    #[test]
    fn test_panels_belong_to_session() {
        let mut first = EditorSession::new();
        let second = EditorSession::new();
        first.panels_mut().toggle(Bar::Find);
        assert!(first.panels().is_visible(Bar::Find));
        assert_eq!(second.panels().open_bar(), None);
        assert_ne!(first.id(), second.id());
    }
}
