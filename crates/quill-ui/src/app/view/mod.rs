pub mod bars;
pub mod dialogs;
pub mod editor;
pub mod menu;

use iced::widget::{column, container, mouse_area, stack, Space};
use iced::{window, Element, Length};

use crate::app::{App, Message};
use crate::theme;

impl App {
    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        let (Ok(session), Some(state)) = (self.sessions.get(id), self.windows.get(&id)) else {
            return Space::new(Length::Fill, Length::Fill).into();
        };

        let content = column![
            self.view_menu_bar(id, state),
            self.view_editor(id, state),
            self.view_bars(id, session, state),
            self.view_status_bar(session, state),
        ];

        let main_view: Element<'_, Message> = mouse_area(
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::bar),
        )
        .on_move(move |point| Message::PointerMoved(id, point))
        .into();

        if state.confirm_exit_visible {
            Self::modal(main_view, self.view_confirm_exit(id), None)
        } else if state.about_visible {
            Self::modal(main_view, self.view_about(id), Some(Message::HideAbout(id)))
        } else if let Some(position) = state.context_menu {
            stack![
                mouse_area(Space::new(Length::Fill, Length::Fill))
                    .on_press(Message::HideContextMenu(id))
                    .on_right_press(Message::HideContextMenu(id)),
                main_view,
                self.view_context_menu(id, position),
            ]
            .into()
        } else if state.active_menu.is_some() {
            stack![
                mouse_area(Space::new(Length::Fill, Length::Fill))
                    .on_press(Message::CloseTopMenu(id)),
                main_view,
                self.view_menu_dropdown(id, state),
            ]
            .into()
        } else {
            main_view
        }
    }

    /// Puts `dialog` over a dimmed `base`. Clicking the backdrop sends
    /// `dismiss`, if any.
    fn modal<'a>(
        base: Element<'a, Message>,
        dialog: Element<'a, Message>,
        dismiss: Option<Message>,
    ) -> Element<'a, Message> {
        let backdrop = container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::overlay);

        let backdrop: Element<'a, Message> = match dismiss {
            Some(message) => mouse_area(backdrop).on_press(message).into(),
            None => mouse_area(backdrop).into(),
        };

        stack![base, backdrop, dialog].into()
    }
}