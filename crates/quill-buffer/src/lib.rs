//! # Quill Buffer
//!
//! Document storage for the editor: a rope-backed text buffer with
//! undo/redo, the literal search primitive the find bar drives, and
//! whole-file text I/O.
//!
//! Offsets are char indices throughout. `Position` converts them to the
//! line/column pairs the UI works with.

mod buffer;
mod file_store;
mod history;
mod position;
mod search;

pub use buffer::{TextBuffer, DEFAULT_UNDO_LIMIT};
pub use file_store::{FileError, FileResult, FileStore};
pub use history::{Edit, EditKind, History};
pub use position::Position;
pub use search::{find_in_chars, is_word_char, FindFlags, SearchMatch, TextSearchEngine};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}
