use iced::widget::{button, checkbox, container, horizontal_space, row, text, text_input, Space};
use iced::{window, Alignment, Element, Length, Padding};

use quill_core::{Bar, Command, EditorSession};

use crate::app::{App, Message, WindowState};
use crate::theme::{self, colors};

impl App {
    /// The find or replace bar, whichever is open.
    pub fn view_bars<'a>(
        &'a self,
        id: window::Id,
        session: &'a EditorSession,
        state: &'a WindowState,
    ) -> Element<'a, Message> {
        match session.panels().open_bar() {
            Some(Bar::Find) => Self::view_find_bar(id, session, state),
            Some(Bar::Replace) => Self::view_replace_bar(id, state),
            None => Space::new(0, 0).into(),
        }
    }

    fn view_find_bar<'a>(
        id: window::Id,
        session: &'a EditorSession,
        state: &'a WindowState,
    ) -> Element<'a, Message> {
        let options = session.search_options();

        let content = row![
            checkbox("Aa", options.case_sensitive)
                .on_toggle(move |value| Message::CaseSensitiveToggled(id, value))
                .size(14)
                .text_size(12),
            checkbox("Whole word", options.whole_word)
                .on_toggle(move |value| Message::WholeWordToggled(id, value))
                .size(14)
                .text_size(12),
            text_input("Find...", &state.find_input)
                .id(state.find_input_id.clone())
                .on_input(move |value| Message::FindInputChanged(id, value))
                .on_submit(Message::Command(id, Command::FindNext))
                .padding(Padding::from([4, 8]))
                .size(13)
                .style(theme::input)
                .width(Length::Fill),
            Self::bar_button("Cancel", Message::HideBar(id, Bar::Find), false),
            Self::bar_button("Find Previous", Message::Command(id, Command::FindPrevious), false),
            Self::bar_button("Find", Message::Command(id, Command::FindNext), true),
        ];

        Self::bar_container(content)
    }

    fn view_replace_bar(id: window::Id, state: &WindowState) -> Element<'_, Message> {
        let content = row![
            text_input("Find...", &state.replace_old)
                .id(state.replace_input_id.clone())
                .on_input(move |value| Message::ReplaceOldChanged(id, value))
                .on_submit(Message::Command(id, Command::ReplaceAll))
                .padding(Padding::from([4, 8]))
                .size(13)
                .style(theme::input)
                .width(Length::FillPortion(1)),
            text_input("Replace with...", &state.replace_new)
                .on_input(move |value| Message::ReplaceNewChanged(id, value))
                .on_submit(Message::Command(id, Command::ReplaceAll))
                .padding(Padding::from([4, 8]))
                .size(13)
                .style(theme::input)
                .width(Length::FillPortion(1)),
            Self::bar_button("Cancel", Message::HideBar(id, Bar::Replace), false),
            Self::bar_button("Replace", Message::Command(id, Command::ReplaceAll), true),
        ];

        Self::bar_container(content)
    }

    fn bar_button<'a>(label: &'a str, message: Message, primary: bool) -> Element<'a, Message> {
        button(text(label).size(12))
            .padding(Padding::from([4, 12]))
            .style(if primary {
                theme::primary_button
            } else {
                theme::secondary_button
            })
            .on_press(message)
            .into()
    }

    fn bar_container<'a>(content: iced::widget::Row<'a, Message>) -> Element<'a, Message> {
        container(content.spacing(8).align_y(Alignment::Center))
            .padding(Padding::from([6, 12]))
            .width(Length::Fill)
            .style(theme::bar)
            .into()
    }

    pub fn view_status_bar<'a>(
        &'a self,
        session: &'a EditorSession,
        state: &'a WindowState,
    ) -> Element<'a, Message> {
        let (line, col) = state.content.cursor_position();

        let file_info = if session.is_dirty() {
            format!("{} [modified]", session.file_name())
        } else {
            session.file_name()
        };

        let status_color = if state.status_message.starts_with("Error")
            || state.status_message.starts_with("No matches")
        {
            colors::WARNING
        } else {
            colors::TEXT_SECONDARY
        };

        let content = row![
            text(&state.status_message).size(12).color(status_color),
            horizontal_space(),
            text(file_info).size(12).color(colors::TEXT_SECONDARY),
            Space::with_width(24),
            text(format!("Ln {}, Col {}", line + 1, col + 1))
                .size(12)
                .color(colors::TEXT_PRIMARY),
        ]
        .padding(Padding::from([6, 12]))
        .align_y(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(28)
            .style(theme::bar)
            .into()
    }
}
