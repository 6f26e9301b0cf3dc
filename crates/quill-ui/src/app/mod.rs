use iced::widget::{text_editor, text_input};
use iced::{event, keyboard, window, Event, Point, Size, Subscription, Task};
use std::collections::BTreeMap;
use std::path::PathBuf;

use quill_core::session::APP_NAME;
use quill_core::{Config, EditorSession, Keymap, WindowRegistry};

pub mod file_ops;
pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

/// Startup options from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// File to load into the first window
    pub file: Option<PathBuf>,
    pub config: Config,
}

/// Toolkit-side state of one window. The document itself lives in the
/// window's `EditorSession`.
pub struct WindowState {
    pub content: text_editor::Content,
    pub find_input: String,
    pub replace_old: String,
    pub replace_new: String,
    pub find_input_id: text_input::Id,
    pub replace_input_id: text_input::Id,
    pub status_message: String,
    pub active_menu: Option<TopMenu>,
    /// Last pointer position inside the window
    pub pointer: Point,
    /// Where the text area's right-click menu is open, if it is
    pub context_menu: Option<Point>,
    pub about_visible: bool,
    pub confirm_exit_visible: bool,
}

impl WindowState {
    fn new(id: window::Id, text: &str) -> Self {
        Self {
            content: text_editor::Content::with_text(text),
            find_input: String::new(),
            replace_old: String::new(),
            replace_new: String::new(),
            find_input_id: text_input::Id::new(format!("find-{:?}", id)),
            replace_input_id: text_input::Id::new(format!("replace-{:?}", id)),
            status_message: "Ready".to_string(),
            active_menu: None,
            pointer: Point::ORIGIN,
            context_menu: None,
            about_visible: false,
            confirm_exit_visible: false,
        }
    }

    /// The text area's contents, joined with `\n`.
    ///
    /// `Content::text` always appends a newline; rebuilding from the lines
    /// keeps a document without a trailing newline unchanged.
    pub fn widget_text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.content.lines().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line);
        }
        text
    }
}

pub struct App {
    pub sessions: WindowRegistry<window::Id>,
    pub windows: BTreeMap<window::Id, WindowState>,
    pub keymap: Keymap,
    pub config: Config,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { file, config } = flags;

        let mut app = Self {
            sessions: WindowRegistry::new(),
            windows: BTreeMap::new(),
            keymap: Keymap::from_config(&config),
            config,
        };

        let mut session = EditorSession::from_config(&app.config);
        let mut status = None;
        if let Some(path) = file {
            if let Err(e) = session.open(&path) {
                tracing::warn!("Could not open {}: {}", path.display(), e);
                status = Some(format!("Error: {}", e));
            }
        }

        let (id, task) = app.open_window(session);
        if let (Some(state), Some(status)) = (app.windows.get_mut(&id), status) {
            state.status_message = status;
        }

        (app, task)
    }

    /// Opens a window showing `session`.
    pub fn open_window(&mut self, session: EditorSession) -> (window::Id, Task<Message>) {
        let (id, open) = window::open(window::Settings {
            size: Size::new(self.config.ui.window_width, self.config.ui.window_height),
            exit_on_close_request: false,
            ..Default::default()
        });

        self.windows
            .insert(id, WindowState::new(id, &session.buffer().text()));
        self.sessions.open(id, session);

        (id, open.map(Message::WindowOpened))
    }

    pub fn title(&self, id: window::Id) -> String {
        self.sessions
            .get(id)
            .map(EditorSession::title)
            .unwrap_or_else(|_| APP_NAME.to_string())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = event::listen_with(|event, _status, id| match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                Some(Message::KeyPressed(id, key, modifiers))
            }
            _ => None,
        });

        Subscription::batch([
            keys,
            window::close_requests().map(Message::CloseRequested),
            window::close_events().map(Message::WindowClosed),
        ])
    }
}

pub fn run(flags: Flags) -> iced::Result {
    iced::daemon(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(|_, _| iced::Theme::Dark)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
