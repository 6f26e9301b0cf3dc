use iced::widget::{mouse_area, text, text_editor};
use iced::{window, Element, Font, Length, Padding};

use crate::app::{App, Message, WindowState};
use crate::theme;

impl App {
    pub fn view_editor<'a>(&'a self, id: window::Id, state: &'a WindowState) -> Element<'a, Message> {
        // text_editor scrolls itself; wrapping it in scrollable() would reset
        // the scroll position on every redraw.
        // Rows must be logical lines: match selection moves the cursor with Down.
        let editor = text_editor(&state.content)
            .height(Length::Fill)
            .padding(Padding {
                top: 12.0,
                right: 16.0,
                bottom: 12.0,
                left: 12.0,
            })
            .font(Font::MONOSPACE)
            .size(self.config.ui.font_size)
            .wrapping(text::Wrapping::None)
            .style(theme::editor)
            .on_action(move |action| Message::EditorAction(id, action));

        mouse_area(editor)
            .on_right_press(Message::ShowContextMenu(id))
            .into()
    }
}
