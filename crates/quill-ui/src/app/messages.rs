use iced::keyboard;
use iced::widget::text_editor;
use iced::{window, Point};
use std::path::PathBuf;

use quill_core::{Bar, Command, ExitAnswer};

/// Every message carries the window it came from.
#[derive(Debug, Clone)]
pub enum Message {
    // Window lifecycle
    WindowOpened(window::Id),
    CloseRequested(window::Id),
    WindowClosed(window::Id),

    // Menu items, bar buttons and shortcuts
    Command(window::Id, Command),
    KeyPressed(window::Id, keyboard::Key, keyboard::Modifiers),

    // Text area
    EditorAction(window::Id, text_editor::Action),
    PointerMoved(window::Id, Point),
    ShowContextMenu(window::Id),
    HideContextMenu(window::Id),

    // Menu bar
    ToggleTopMenu(window::Id, TopMenu),
    CloseTopMenu(window::Id),

    // Find bar
    FindInputChanged(window::Id, String),
    CaseSensitiveToggled(window::Id, bool),
    WholeWordToggled(window::Id, bool),

    // Replace bar
    ReplaceOldChanged(window::Id, String),
    ReplaceNewChanged(window::Id, String),

    // Cancel button of either bar
    HideBar(window::Id, Bar),

    // Dialogs
    OpenPicked(window::Id, Option<PathBuf>),
    SavePicked(window::Id, Option<PathBuf>),
    ExitAnswered(window::Id, ExitAnswer),
    HideAbout(window::Id),
}

/// Right-click menu of the text area.
pub const CONTEXT_MENU: [Command; 3] = [Command::Copy, Command::Cut, Command::Paste];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopMenu {
    File,
    Edit,
    Search,
    Help,
}

impl TopMenu {
    pub const ALL: [TopMenu; 4] = [TopMenu::File, TopMenu::Edit, TopMenu::Search, TopMenu::Help];

    pub fn label(&self) -> &'static str {
        match self {
            TopMenu::File => "File",
            TopMenu::Edit => "Edit",
            TopMenu::Search => "Search",
            TopMenu::Help => "Help",
        }
    }

    /// Entries in display order; `None` is a separator.
    pub fn entries(&self) -> &'static [Option<Command>] {
        match self {
            TopMenu::File => &[
                Some(Command::NewWindow),
                Some(Command::Open),
                None,
                Some(Command::Save),
                Some(Command::SaveAs),
                None,
                Some(Command::Exit),
            ],
            TopMenu::Edit => &[
                Some(Command::Redo),
                Some(Command::Undo),
                None,
                Some(Command::Copy),
                Some(Command::Cut),
                Some(Command::Paste),
                None,
                Some(Command::SelectAll),
            ],
            TopMenu::Search => &[
                Some(Command::ToggleFind),
                Some(Command::ToggleReplace),
                None,
                Some(Command::FindNext),
                Some(Command::FindPrevious),
            ],
            TopMenu::Help => &[Some(Command::About)],
        }
    }

    /// Horizontal offset of the dropdown under its title.
    pub fn offset(&self) -> f32 {
        match self {
            TopMenu::File => 8.0,
            TopMenu::Edit => 48.0,
            TopMenu::Search => 88.0,
            TopMenu::Help => 146.0,
        }
    }
}
