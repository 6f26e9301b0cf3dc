//! Keyboard shortcuts.
//!
//! The UI translates toolkit key events into `KeyPress` values and asks the
//! keymap for a `Command`. Defaults cover the shortcuts listed in the menus;
//! `[keyboard.bindings]` in the config file overrides or extends them.

use std::collections::HashMap;

use crate::command::Command;
use crate::config::{Config, ConfigError};

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: true,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    /// Parses modifiers from a string like "ctrl+shift". An empty string
    /// means no modifiers; an unknown name fails the whole parse.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        if s.trim().is_empty() {
            return Some(modifiers);
        }

        for part in s.split('+') {
            match part.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return None,
            }
        }
        Some(modifiers)
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code. Letters are stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    F(u8),
}

impl Key {
    /// Parses a key name such as "s", "esc" or "f3".
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            _ if lower.len() > 1 && lower.starts_with('f') => {
                lower[1..].parse().ok().filter(|n| (1..=24).contains(n)).map(Key::F)
            }
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Builds a character key, folding letters to lowercase.
    pub fn char(c: char) -> Self {
        Key::Char(c.to_lowercase().next().unwrap_or(c))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A key together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses a binding string like "ctrl+s" or "shift+f3".
    pub fn parse(s: &str) -> Option<Self> {
        let (mods, key) = match s.rsplit_once('+') {
            // "ctrl++" binds the plus key
            Some((mods, "")) => (mods.strip_suffix('+')?, "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        Some(Self {
            key: Key::parse(key)?,
            modifiers: Modifiers::parse(mods)?,
        })
    }
}

impl KeyPress {
    /// Whether this press would also type a character into the text area.
    pub fn types_text(&self) -> bool {
        matches!(self.key, Key::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }
}

impl std::fmt::Display for KeyPress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Maps key presses to commands.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyPress, Command>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap
    }

    /// Default bindings plus the config's overrides.
    ///
    /// Entries that fail to parse are logged and skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();
        for (key_str, cmd_str) in &config.keyboard.bindings {
            if let Err(e) = keymap.bind_str(key_str, cmd_str) {
                tracing::warn!("Ignoring key binding: {}", e);
            }
        }
        keymap
    }

    fn add_default_bindings(&mut self) {
        use Command::*;

        let ctrl = |c| KeyPress::new(Key::Char(c), Modifiers::CTRL);
        let defaults = [
            (ctrl('n'), NewWindow),
            (ctrl('o'), Open),
            (ctrl('s'), Save),
            (KeyPress::new(Key::Char('s'), Modifiers::CTRL_SHIFT), SaveAs),
            (ctrl('q'), Exit),
            (ctrl('z'), Undo),
            (ctrl('y'), Redo),
            (KeyPress::new(Key::Char('z'), Modifiers::CTRL_SHIFT), Redo),
            (ctrl('f'), ToggleFind),
            (ctrl('h'), ToggleReplace),
            (KeyPress::new(Key::Escape, Modifiers::NONE), HideBars),
            (KeyPress::new(Key::F(3), Modifiers::NONE), FindNext),
            (KeyPress::new(Key::F(3), Modifiers::SHIFT), FindPrevious),
        ];

        self.bindings.extend(defaults);
    }

    /// Binds (or rebinds) a key.
    pub fn bind(&mut self, key: KeyPress, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Binds a key from its config-file spelling.
    ///
    /// Keys are listened to even while the text area has focus, so a
    /// character key must carry Ctrl or Alt.
    pub fn bind_str(&mut self, key: &str, command: &str) -> Result<(), ConfigError> {
        let key_press = KeyPress::parse(key)
            .filter(|press| !press.types_text())
            .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
        let command =
            Command::parse(command).ok_or_else(|| ConfigError::UnknownCommand(command.to_string()))?;
        self.bind(key_press, command);
        Ok(())
    }

    /// Looks up the command bound to a key press.
    pub fn lookup(&self, key: &KeyPress) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    /// Shortcut label for a command, for menus. Picks the shortest binding
    /// so the label is stable.
    pub fn shortcut_for(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, cmd)| **cmd == command)
            .map(|(key, _)| key.to_string())
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
