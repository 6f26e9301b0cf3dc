//! # Quill UI
//!
//! The iced front end. One daemon drives every window; each window shows
//! its own `EditorSession` through the usual update/view cycle:
//!
//! - **Message**: something that happened in a window
//! - **Update**: applies it to that window's session and UI state
//! - **View**: draws a window from its state

pub mod app;
pub mod theme;

pub use app::{run, App, Flags};
