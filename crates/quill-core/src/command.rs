//! Editor commands.
//!
//! Menu items and key bindings both resolve to a `Command`; the UI turns
//! commands into its own messages. Commands are plain values so they can be
//! stored in the keymap and named in the config file.

/// Built-in editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // File commands
    NewWindow,
    Open,
    Save,
    SaveAs,
    Exit,

    // Edit commands
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    // Search
    ToggleFind,
    ToggleReplace,
    HideBars,
    FindNext,
    FindPrevious,
    ReplaceAll,

    // Help
    About,
}

impl Command {
    const ALL: [Command; 18] = [
        Command::NewWindow,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Exit,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::ToggleFind,
        Command::ToggleReplace,
        Command::HideBars,
        Command::FindNext,
        Command::FindPrevious,
        Command::ReplaceAll,
        Command::About,
    ];

    /// Label shown in menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::NewWindow => "New",
            Command::Open => "Open",
            Command::Save => "Save",
            Command::SaveAs => "Save As",
            Command::Exit => "Exit",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::ToggleFind => "Find",
            Command::ToggleReplace => "Replace",
            Command::HideBars => "Close Bars",
            Command::FindNext => "Find Next",
            Command::FindPrevious => "Find Previous",
            Command::ReplaceAll => "Replace All",
            Command::About => "About",
        }
    }

    /// Identifier used in `[keyboard.bindings]`.
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewWindow => "new_window",
            Command::Open => "open",
            Command::Save => "save",
            Command::SaveAs => "save_as",
            Command::Exit => "exit",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::SelectAll => "select_all",
            Command::ToggleFind => "find",
            Command::ToggleReplace => "replace",
            Command::HideBars => "hide_bars",
            Command::FindNext => "find_next",
            Command::FindPrevious => "find_previous",
            Command::ReplaceAll => "replace_all",
            Command::About => "about",
        }
    }

    /// Parses a config identifier. Accepts `-` in place of `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|cmd| cmd.name() == normalized)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Command; 18] = [
        Command::NewWindow,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Exit,
        Command::Undo,
        Command::Redo,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::ToggleFind,
        Command::ToggleReplace,
        Command::HideBars,
        Command::FindNext,
        Command::FindPrevious,
        Command::ReplaceAll,
        Command::About,
    ];

    #[test]
    fn test_display_name() {
        assert_eq!(Command::Save.display_name(), "Save");
        assert_eq!(Command::ToggleReplace.to_string(), "Replace");
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for cmd in ALL {
            assert_eq!(Command::parse(cmd.name()), Some(cmd));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(Command::parse(" Save-As "), Some(Command::SaveAs));
        assert_eq!(Command::parse("launch_rockets"), None);
    }
}
