//! # Quill Core
//!
//! Editor logic that does not depend on the GUI toolkit.
//!
//! ```text
//! WindowRegistry
//!   └── EditorSession (one per window)
//!         ├── TextBuffer        document text + undo
//!         ├── FileStore         whole-file read/write
//!         ├── SearchController  find next / previous, replace all
//!         └── Panels            find / replace bar visibility
//! ```
//!
//! Key presses and menu items resolve to a `Command` through the `Keymap`;
//! the UI crate maps commands to session calls.

pub mod command;
pub mod config;
pub mod keymap;
pub mod panels;
pub mod search;
pub mod session;
pub mod window;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use keymap::{Key, KeyPress, Keymap, Modifiers};
pub use panels::{Bar, Panels};
pub use search::{SearchController, SearchOptions, SearchOutcome, SearchState};
pub use session::{CloseRequest, EditorSession, ExitAnswer, SessionId};
pub use window::WindowRegistry;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Document has no file path")]
    NoPath,

    #[error("Unknown window: {0}")]
    UnknownWindow(String),

    #[error(transparent)]
    File(#[from] quill_buffer::FileError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] quill_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
