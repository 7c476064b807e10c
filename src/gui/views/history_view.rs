use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};

/// Raw history log, newest entries last
pub fn history_view(content: &str) -> Element<'_, Message> {
    let header = row![
        text("Download History")
            .size(26)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        Space::with_width(Length::Fill),
        button(text("Refresh").size(14))
            .on_press(Message::RefreshHistory)
            .padding([8, 16])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
    ]
    .align_items(Alignment::Center);

    let log = scrollable(
        text(content)
            .size(13)
            .font(iced::Font::MONOSPACE)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .style(iced::theme::Scrollable::Custom(Box::new(theme::ScrollableStyle)));

    column![
        header,
        container(log)
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer))),
    ]
    .spacing(20)
    .into()
}
