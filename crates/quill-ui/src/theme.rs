//! Colors and widget styles.
//!
//! One dark palette; the widget style functions are shared by the menu bar,
//! the find/replace bars and the dialogs.

use iced::widget::{button, container, text_editor, text_input};
use iced::{Background, Border, Color, Theme};

pub mod colors {
    use iced::Color;

    pub const BG_DARK: Color = Color::from_rgb(0.11, 0.11, 0.13);
    pub const BG_MEDIUM: Color = Color::from_rgb(0.14, 0.14, 0.16);
    pub const BG_LIGHT: Color = Color::from_rgb(0.18, 0.18, 0.20);
    pub const BG_HOVER: Color = Color::from_rgb(0.22, 0.22, 0.25);
    pub const BG_ACTIVE: Color = Color::from_rgb(0.25, 0.25, 0.28);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.65, 0.65, 0.68);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.45, 0.48);

    pub const ACCENT: Color = Color::from_rgb(0.36, 0.54, 0.90);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.40, 0.58, 0.95);
    pub const WARNING: Color = Color::from_rgb(0.90, 0.70, 0.35);

    pub const SELECTION: Color = Color::from_rgba(0.25, 0.46, 0.85, 0.55);
    pub const OVERLAY: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.5);

    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
}

/// Top-level menu button; `active` while its dropdown is open.
pub fn menu_title(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_, status| {
        let bg = if active {
            colors::BG_ACTIVE
        } else {
            match status {
                button::Status::Hovered => colors::BG_HOVER,
                _ => colors::BG_MEDIUM,
            }
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: colors::TEXT_PRIMARY,
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Dropdown menu entry.
pub fn menu_entry(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::BG_HOVER,
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border::default(),
        ..Default::default()
    }
}

/// Secondary button (Cancel, No, Find Previous).
pub fn secondary_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::BG_HOVER,
        _ => colors::BG_LIGHT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Primary button (Find, Replace, Yes).
pub fn primary_button(_: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => colors::ACCENT_HOVER,
        _ => colors::ACCENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: Color::WHITE,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Menu bar, bottom bars and status bar.
pub fn bar(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// Dropdowns and dialogs.
pub fn floating(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_MEDIUM)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

/// Dimmed backdrop behind a dialog.
pub fn overlay(_: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::OVERLAY)),
        ..Default::default()
    }
}

pub fn editor(_: &Theme, _status: text_editor::Status) -> text_editor::Style {
    text_editor::Style {
        background: Background::Color(colors::BG_DARK),
        border: Border {
            width: 0.0,
            radius: 0.0.into(),
            color: Color::TRANSPARENT,
        },
        icon: colors::TEXT_MUTED,
        placeholder: colors::TEXT_MUTED,
        value: colors::TEXT_PRIMARY,
        selection: colors::SELECTION,
    }
}

pub fn input(_: &Theme, status: text_input::Status) -> text_input::Style {
    let border = match status {
        text_input::Status::Focused => colors::ACCENT,
        _ => colors::BORDER,
    };
    text_input::Style {
        background: Background::Color(colors::BG_DARK),
        border: Border {
            color: border,
            width: 1.0,
            radius: 4.0.into(),
        },
        icon: colors::TEXT_MUTED,
        placeholder: colors::TEXT_MUTED,
        value: colors::TEXT_PRIMARY,
        selection: colors::SELECTION,
    }
}
