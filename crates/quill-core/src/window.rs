//! Open windows and their sessions.
//!
//! Each window gets its own `EditorSession`. The registry is generic over
//! the key so the core does not depend on the toolkit's window id type.
//! The application exits once the last window is closed.

use std::collections::BTreeMap;

use crate::session::EditorSession;
use crate::{CoreError, CoreResult};

/// Sessions keyed by window id.
#[derive(Debug)]
pub struct WindowRegistry<K> {
    sessions: BTreeMap<K, EditorSession>,
}

impl<K> WindowRegistry<K>
where
    K: Ord + Copy + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }

    /// Registers a newly opened window.
    pub fn open(&mut self, key: K, session: EditorSession) {
        tracing::info!("Window {:?} opened (session {})", key, session.id());
        self.sessions.insert(key, session);
    }

    /// Forgets a closed window, returning its session.
    ///
    /// Returns `None` if the window was never registered.
    pub fn close(&mut self, key: K) -> Option<EditorSession> {
        let session = self.sessions.remove(&key)?;
        tracing::info!(
            "Window {:?} closed, {} remaining",
            key,
            self.sessions.len()
        );
        Some(session)
    }

    pub fn get(&self, key: K) -> CoreResult<&EditorSession> {
        self.sessions
            .get(&key)
            .ok_or_else(|| CoreError::UnknownWindow(format!("{:?}", key)))
    }

    pub fn get_mut(&mut self, key: K) -> CoreResult<&mut EditorSession> {
        self.sessions
            .get_mut(&key)
            .ok_or_else(|| CoreError::UnknownWindow(format!("{:?}", key)))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True once every window has closed.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<K> Default for WindowRegistry<K>
where
    K: Ord + Copy + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let mut registry = WindowRegistry::new();
        registry.open(1u32, EditorSession::new());
        registry.open(2u32, EditorSession::new());
        assert_eq!(registry.len(), 2);
        assert!(registry.get(1).is_ok() && registry.get(2).is_ok());

        assert!(registry.close(1).is_some());
        assert!(!registry.is_empty());
        assert!(registry.close(2).is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_unknown_window() {
        let mut registry: WindowRegistry<u32> = WindowRegistry::new();
        assert!(registry.close(7).is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut registry = WindowRegistry::new();
        registry.open(1u32, EditorSession::new());
        registry.open(2u32, EditorSession::new());

        registry.get_mut(1).unwrap().apply_widget_text("one").unwrap();
        assert_eq!(registry.get(1).unwrap().buffer().text(), "one");
        assert!(registry.get(2).unwrap().buffer().is_empty());
    }

    #[test]
    fn test_unknown_window_error() {
        let registry: WindowRegistry<u32> = WindowRegistry::new();
        assert!(matches!(registry.get(3), Err(CoreError::UnknownWindow(_))));
    }
}
