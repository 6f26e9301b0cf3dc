use iced::widget::{button, column, container, horizontal_space, row, text, Column, Row, Space};
use iced::{window, Alignment, Element, Length, Padding, Point};

use quill_core::Command;

use crate::app::{App, Message, TopMenu, WindowState, CONTEXT_MENU};
use crate::theme::{self, colors};

impl App {
    pub fn view_menu_bar(&self, id: window::Id, state: &WindowState) -> Element<'_, Message> {
        let mut titles: Vec<Element<'_, Message>> = Vec::new();

        for menu in TopMenu::ALL {
            let is_active = state.active_menu == Some(menu);
            let label = text(menu.label()).size(12).color(if is_active {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_SECONDARY
            });

            titles.push(
                button(label)
                    .padding(Padding::from([6, 10]))
                    .style(theme::menu_title(is_active))
                    .on_press(Message::ToggleTopMenu(id, menu))
                    .into(),
            );
        }
        titles.push(horizontal_space().into());

        container(
            Row::with_children(titles)
                .spacing(2)
                .padding(Padding::from([4, 8]))
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .style(theme::bar)
        .into()
    }

    pub fn view_menu_dropdown(&self, id: window::Id, state: &WindowState) -> Element<'_, Message> {
        let Some(menu) = state.active_menu else {
            return Space::new(0, 0).into();
        };

        let items: Vec<Element<'_, Message>> = menu
            .entries()
            .iter()
            .map(|entry| match entry {
                Some(command) => self.menu_item(id, *command),
                None => Self::menu_separator(),
            })
            .collect();

        let menu_box = container(Column::with_children(items).width(Length::Fixed(240.0)).padding(4))
            .style(theme::floating);

        column![
            Space::with_height(Length::Fixed(32.0)),
            row![Space::with_width(Length::Fixed(menu.offset())), menu_box],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Copy/Cut/Paste popup, opened by right-clicking the text area.
    pub fn view_context_menu(&self, id: window::Id, position: Point) -> Element<'_, Message> {
        let items: Vec<Element<'_, Message>> = CONTEXT_MENU
            .iter()
            .map(|command| self.menu_item(id, *command))
            .collect();

        let menu_box = container(Column::with_children(items).width(Length::Fixed(180.0)).padding(4))
            .style(theme::floating);

        column![
            Space::with_height(Length::Fixed(position.y)),
            row![Space::with_width(Length::Fixed(position.x)), menu_box],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// A dropdown entry labelled with its command and current shortcut.
    fn menu_item(&self, id: window::Id, command: Command) -> Element<'_, Message> {
        let shortcut = self.keymap.shortcut_for(command).unwrap_or_default();

        button(
            row![
                text(command.display_name()).size(12).color(colors::TEXT_PRIMARY),
                horizontal_space(),
                text(shortcut).size(11).color(colors::TEXT_MUTED),
            ]
            .width(Length::Fill)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(Padding::from([6, 16]))
        .style(theme::menu_entry)
        .on_press(Message::Command(id, command))
        .into()
    }

    fn menu_separator<'a>() -> Element<'a, Message> {
        container(Space::new(Length::Fill, 1))
            .padding(Padding::from([4, 8]))
            .style(|_| container::Style {
                background: Some(iced::Background::Color(colors::BORDER)),
                ..Default::default()
            })
            .into()
    }
}
