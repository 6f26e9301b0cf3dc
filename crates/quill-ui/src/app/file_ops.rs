use iced::widget::text_editor;
use iced::{window, Task};
use std::path::{Path, PathBuf};

use quill_core::config::FileConfig;

use super::{App, Message};

/// Shows the Open dialog. Any file may be picked.
async fn pick_open_path() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open")
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Shows the Save dialog with the configured filter, e.g. `Text Files (*.txt)`.
async fn pick_save_path(filter_name: String, extension: String, file_name: String) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Save As")
        .add_filter(&filter_name, &[extension.as_str()])
        .set_file_name(&file_name)
        .save_file()
        .await
        .map(|file| file.path().to_path_buf())
}

impl App {
    pub fn show_open_dialog(&self, id: window::Id) -> Task<Message> {
        Task::perform(pick_open_path(), move |path| Message::OpenPicked(id, path))
    }

    pub fn show_save_dialog(&self, id: window::Id) -> Task<Message> {
        let FileConfig {
            save_extension,
            save_filter_name,
        } = self.config.files.clone();
        let file_name = self
            .sessions
            .get(id)
            .ok()
            .and_then(|session| session.path().and_then(Path::file_name))
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("untitled.{}", save_extension));

        Task::perform(
            pick_save_path(save_filter_name, save_extension, file_name),
            move |path| Message::SavePicked(id, path),
        )
    }

    /// Loads the picked file into the window. A cancelled dialog changes
    /// nothing.
    pub fn open_picked(&mut self, id: window::Id, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        let (Ok(session), Some(state)) = (self.sessions.get_mut(id), self.windows.get_mut(&id)) else {
            return;
        };

        match session.open(&path) {
            Ok(()) => {
                state.content = text_editor::Content::with_text(&session.buffer().text());
                state.status_message = format!("Opened: {}", session.file_name());
            }
            Err(e) => {
                state.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Saves to the window's file, or asks for one.
    pub fn save(&mut self, id: window::Id) -> Task<Message> {
        let Ok(session) = self.sessions.get_mut(id) else {
            return Task::none();
        };
        if session.path().is_none() {
            return self.show_save_dialog(id);
        }

        let result = session.save();
        let name = session.file_name();
        if let Some(state) = self.windows.get_mut(&id) {
            state.status_message = match result {
                Ok(()) => format!("Saved: {}", name),
                Err(e) => format!("Error: {}", e),
            };
        }
        Task::none()
    }

    /// Writes the window's document to the picked path.
    pub fn save_picked(&mut self, id: window::Id, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        let (Ok(session), Some(state)) = (self.sessions.get_mut(id), self.windows.get_mut(&id)) else {
            return;
        };

        state.status_message = match session.save_as(&path) {
            Ok(()) => format!("Saved: {}", session.file_name()),
            Err(e) => format!("Error: {}", e),
        };
    }
}
