use iced::widget::{button, column, container, row, text, Space};
use iced::{window, Alignment, Element, Length, Padding};

use quill_core::ExitAnswer;

use crate::app::{App, Message};
use crate::theme::{self, colors};

impl App {
    /// "There are unsaved changes" prompt. Only Yes closes the window.
    pub fn view_confirm_exit(&self, id: window::Id) -> Element<'_, Message> {
        let answer = |label: &'static str, answer: ExitAnswer, primary: bool| {
            button(text(label).size(13))
                .padding(Padding::from([8, 20]))
                .style(if primary {
                    theme::primary_button
                } else {
                    theme::secondary_button
                })
                .on_press(Message::ExitAnswered(id, answer))
        };

        let modal_content = column![
            text("Exit").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            text("There are unsaved changes. Do you want to exit?")
                .size(13)
                .color(colors::TEXT_SECONDARY),
            Space::with_height(16),
            row![
                answer("Cancel", ExitAnswer::Cancel, false),
                Space::with_width(12),
                answer("No", ExitAnswer::No, false),
                Space::with_width(12),
                answer("Yes", ExitAnswer::Yes, true),
            ]
            .align_y(Alignment::Center),
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        Self::centered(modal_content.into())
    }

    pub fn view_about(&self, id: window::Id) -> Element<'_, Message> {
        let modal_content = column![
            text("Quill - Help").size(16).color(colors::TEXT_PRIMARY),
            Space::with_height(12),
            text("A simple handmade text editor.")
                .size(13)
                .color(colors::TEXT_SECONDARY),
            text(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(11)
                .color(colors::TEXT_MUTED),
            Space::with_height(16),
            button(text("OK").size(13))
                .padding(Padding::from([8, 20]))
                .style(theme::primary_button)
                .on_press(Message::HideAbout(id)),
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        Self::centered(modal_content.into())
    }

    fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
        container(container(content).style(theme::floating))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
