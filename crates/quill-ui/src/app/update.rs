use iced::keyboard::{self, key::Named};
use iced::widget::{text_editor, text_input};
use iced::{window, Task};
use std::sync::Arc;

use quill_core::{
    Bar, CloseRequest, Command, EditorSession, Key, KeyPress, Modifiers, SearchOptions,
    SearchOutcome,
};

use super::{App, Message, WindowState};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => {
                tracing::debug!("Window {:?} is up", id);
            }

            Message::CloseRequested(id) => {
                return self.update(Message::Command(id, Command::Exit));
            }

            Message::WindowClosed(id) => {
                self.windows.remove(&id);
                self.sessions.close(id);
                if self.sessions.is_empty() {
                    tracing::info!("Last window closed, exiting");
                    return iced::exit();
                }
            }

            Message::Command(id, command) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.active_menu = None;
                    state.context_menu = None;
                }
                return self.run_command(id, command);
            }

            Message::KeyPressed(id, key, modifiers) => {
                let command = to_key_press(&key, modifiers).and_then(|press| self.keymap.lookup(&press));
                if let Some(command) = command {
                    return self.update(Message::Command(id, command));
                }
            }

            Message::EditorAction(id, action) => {
                let (Ok(session), Some(state)) = (self.sessions.get_mut(id), self.windows.get_mut(&id)) else {
                    return Task::none();
                };
                state.active_menu = None;
                state.context_menu = None;

                let is_edit = action.is_edit();
                state.content.perform(action);
                if is_edit {
                    sync_from_widget(session, state);
                }
            }

            Message::PointerMoved(id, point) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.pointer = point;
                }
            }

            Message::ShowContextMenu(id) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.active_menu = None;
                    state.context_menu = Some(state.pointer);
                }
            }

            Message::HideContextMenu(id) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.context_menu = None;
                }
            }

            Message::ToggleTopMenu(id, menu) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.context_menu = None;
                    state.active_menu = if state.active_menu == Some(menu) {
                        None
                    } else {
                        Some(menu)
                    };
                }
            }

            Message::CloseTopMenu(id) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.active_menu = None;
                }
            }

            Message::FindInputChanged(id, value) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.find_input = value;
                }
            }

            Message::CaseSensitiveToggled(id, case_sensitive) => {
                if let Ok(session) = self.sessions.get_mut(id) {
                    let options = session.search_options();
                    session.set_search_options(SearchOptions::new(case_sensitive, options.whole_word));
                }
            }

            Message::WholeWordToggled(id, whole_word) => {
                if let Ok(session) = self.sessions.get_mut(id) {
                    let options = session.search_options();
                    session.set_search_options(SearchOptions::new(options.case_sensitive, whole_word));
                }
            }

            Message::ReplaceOldChanged(id, value) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.replace_old = value;
                }
            }

            Message::ReplaceNewChanged(id, value) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.replace_new = value;
                }
            }

            Message::HideBar(id, bar) => {
                if let Ok(session) = self.sessions.get_mut(id) {
                    session.panels_mut().hide(bar);
                }
            }

            Message::OpenPicked(id, path) => {
                self.open_picked(id, path);
            }

            Message::SavePicked(id, path) => {
                self.save_picked(id, path);
            }

            Message::ExitAnswered(id, answer) => {
                let close = self
                    .sessions
                    .get(id)
                    .map(|session| session.resolve_close(answer))
                    .unwrap_or(false);
                if let Some(state) = self.windows.get_mut(&id) {
                    state.confirm_exit_visible = false;
                }
                if close {
                    return window::close(id);
                }
            }

            Message::HideAbout(id) => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.about_visible = false;
                }
            }
        }
        Task::none()
    }

    fn run_command(&mut self, id: window::Id, command: Command) -> Task<Message> {
        tracing::debug!("Window {:?}: {}", id, command.name());

        match command {
            Command::NewWindow => {
                let session = EditorSession::from_config(&self.config);
                let (_, task) = self.open_window(session);
                return task;
            }
            Command::Open => return self.show_open_dialog(id),
            Command::Save => return self.save(id),
            Command::SaveAs => return self.show_save_dialog(id),
            Command::About => {
                if let Some(state) = self.windows.get_mut(&id) {
                    state.about_visible = true;
                }
                return Task::none();
            }
            _ => {}
        }

        let (Ok(session), Some(state)) = (self.sessions.get_mut(id), self.windows.get_mut(&id)) else {
            return Task::none();
        };

        match command {
            Command::Exit => match session.request_close() {
                CloseRequest::Close => return window::close(id),
                CloseRequest::Confirm => state.confirm_exit_visible = true,
            },

            Command::Undo => {
                state.status_message = match session.undo() {
                    Ok(()) => "Undo".to_string(),
                    Err(_) => "Nothing to undo".to_string(),
                };
                reload_widget(session, state);
            }

            Command::Redo => {
                state.status_message = match session.redo() {
                    Ok(()) => "Redo".to_string(),
                    Err(_) => "Nothing to redo".to_string(),
                };
                reload_widget(session, state);
            }

            Command::Cut => {
                if let Some(selected) = state.content.selection() {
                    copy_to_clipboard(&selected);
                    state
                        .content
                        .perform(text_editor::Action::Edit(text_editor::Edit::Delete));
                    sync_from_widget(session, state);
                    state.status_message = "Cut".to_string();
                }
            }

            Command::Copy => {
                state.status_message = match state.content.selection() {
                    Some(selected) => {
                        copy_to_clipboard(&selected);
                        "Copied".to_string()
                    }
                    None => "Nothing selected".to_string(),
                };
            }

            Command::Paste => match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
                Ok(clip_text) => {
                    state.content.perform(text_editor::Action::Edit(
                        text_editor::Edit::Paste(Arc::new(clip_text)),
                    ));
                    sync_from_widget(session, state);
                    state.status_message = "Pasted".to_string();
                }
                Err(e) => tracing::warn!("Clipboard read failed: {}", e),
            },

            Command::SelectAll => {
                state.content.perform(text_editor::Action::SelectAll);
            }

            Command::ToggleFind => {
                if session.panels_mut().toggle(Bar::Find) {
                    return text_input::focus(state.find_input_id.clone());
                }
            }

            Command::ToggleReplace => {
                if session.panels_mut().toggle(Bar::Replace) {
                    return text_input::focus(state.replace_input_id.clone());
                }
            }

            Command::HideBars => session.panels_mut().hide_all(),

            Command::FindNext | Command::FindPrevious => {
                let term = state.find_input.clone();
                let outcome = if command == Command::FindNext {
                    session.find_next(&term)
                } else {
                    session.find_previous(&term)
                };
                if let Some(found) = outcome.matched() {
                    select_match(session, state, found);
                }
                state.status_message = search_status(&outcome, &term);
            }

            Command::ReplaceAll => {
                let count = session.replace_all(&state.replace_old, &state.replace_new);
                if count > 0 {
                    reload_widget(session, state);
                }
                state.status_message = format!("Replaced {} occurrence(s)", count);
            }

            Command::NewWindow | Command::Open | Command::Save | Command::SaveAs | Command::About => {}
        }
        Task::none()
    }
}

/// Folds the text area's contents into the session's document.
fn sync_from_widget(session: &mut EditorSession, state: &mut WindowState) {
    if let Err(e) = session.apply_widget_text(&state.widget_text()) {
        tracing::warn!("Could not sync text area: {}", e);
    }
}

/// Rebuilds the text area from the document after the document changed
/// underneath it (undo, redo, replace all).
fn reload_widget(session: &EditorSession, state: &mut WindowState) {
    state.content = text_editor::Content::with_text(&session.buffer().text());
}

/// Selects a match in the text area.
fn select_match(session: &EditorSession, state: &mut WindowState, found: quill_buffer::SearchMatch) {
    let position = match session.match_position(found) {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!("Match outside document: {}", e);
            return;
        }
    };

    let content = &mut state.content;
    content.perform(text_editor::Action::Move(text_editor::Motion::DocumentStart));
    for _ in 0..position.line {
        content.perform(text_editor::Action::Move(text_editor::Motion::Down));
    }
    content.perform(text_editor::Action::Move(text_editor::Motion::Home));
    for _ in 0..position.column {
        content.perform(text_editor::Action::Move(text_editor::Motion::Right));
    }
    for _ in 0..found.len {
        content.perform(text_editor::Action::Select(text_editor::Motion::Right));
    }
}

fn copy_to_clipboard(text: &str) {
    if let Err(e) = arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
        tracing::warn!("Clipboard write failed: {}", e);
    }
}

/// Status bar text after a find.
pub fn search_status(outcome: &SearchOutcome, term: &str) -> String {
    match outcome {
        SearchOutcome::Found(_) => String::new(),
        SearchOutcome::Wrapped(_) => "Search wrapped".to_string(),
        SearchOutcome::NotFound => format!("No matches for \"{}\"", term),
    }
}

/// Translates a toolkit key event into a keymap key press.
pub fn to_key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    let key = match key.as_ref() {
        keyboard::Key::Character(c) => Key::char(c.chars().next()?),
        keyboard::Key::Named(Named::Enter) => Key::Enter,
        keyboard::Key::Named(Named::Escape) => Key::Escape,
        keyboard::Key::Named(named) => Key::F(function_key(named)?),
        keyboard::Key::Unidentified => return None,
    };

    Some(KeyPress::new(
        key,
        Modifiers {
            ctrl: modifiers.control(),
            alt: modifiers.alt(),
            shift: modifiers.shift(),
        },
    ))
}

fn function_key(named: Named) -> Option<u8> {
    use Named::*;

    let n = match named {
        F1 => 1,
        F2 => 2,
        F3 => 3,
        F4 => 4,
        F5 => 5,
        F6 => 6,
        F7 => 7,
        F8 => 8,
        F9 => 9,
        F10 => 10,
        F11 => 11,
        F12 => 12,
        _ => return None,
    };
    Some(n)
}
