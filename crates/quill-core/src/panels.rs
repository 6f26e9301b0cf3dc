//! Find/replace bar visibility.
//!
//! At most one bar is open at a time, so the state is a single optional
//! `Bar` rather than two flags that could disagree.

/// The bottom bars of an editor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bar {
    Find,
    Replace,
}

/// Which bar, if any, is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    open: Option<Bar>,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open bar.
    pub fn open_bar(&self) -> Option<Bar> {
        self.open
    }

    pub fn is_visible(&self, bar: Bar) -> bool {
        self.open == Some(bar)
    }

    /// Shows `bar` if hidden, hides it if showing. Showing one bar hides
    /// the other. Returns whether `bar` is now visible.
    pub fn toggle(&mut self, bar: Bar) -> bool {
        self.open = if self.is_visible(bar) { None } else { Some(bar) };
        tracing::debug!("Bars now: {:?}", self.open);
        self.is_visible(bar)
    }

    /// Hides `bar` (its Cancel button). Leaves the other bar alone.
    pub fn hide(&mut self, bar: Bar) {
        if self.is_visible(bar) {
            self.open = None;
        }
    }

    /// Hides both bars (Escape).
    pub fn hide_all(&mut self) {
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let panels = Panels::new();
        assert_eq!(panels.open_bar(), None);
    }

    #[test]
    fn test_toggle_shows_then_hides() {
        let mut panels = Panels::new();
        assert!(panels.toggle(Bar::Find));
        assert!(panels.is_visible(Bar::Find));
        assert!(!panels.toggle(Bar::Find));
        assert_eq!(panels.open_bar(), None);
    }

    #[test]
    fn test_bars_are_mutually_exclusive() {
        let mut panels = Panels::new();
        panels.toggle(Bar::Replace);
        panels.toggle(Bar::Find);
        assert!(panels.is_visible(Bar::Find));
        assert!(!panels.is_visible(Bar::Replace));

        panels.toggle(Bar::Replace);
        assert!(panels.is_visible(Bar::Replace));
        assert!(!panels.is_visible(Bar::Find));
    }

    #[test]
    fn test_escape_hides_either_bar() {
        for bar in [Bar::Find, Bar::Replace] {
            let mut panels = Panels::new();
            panels.toggle(bar);
            panels.hide_all();
            assert_eq!(panels.open_bar(), None);
        }
    }

    #[test]
    fn test_cancel_only_hides_its_own_bar() {
        let mut panels = Panels::new();
        panels.toggle(Bar::Replace);
        panels.hide(Bar::Find);
        assert!(panels.is_visible(Bar::Replace));
        panels.hide(Bar::Replace);
        assert_eq!(panels.open_bar(), None);
    }
}
