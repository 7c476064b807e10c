use crate::backend::DownloadForm;
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{checkbox, column, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

/// Download-all, reverse and range controls for a playlist
pub fn playlist_options<'a>(
    form: &'a DownloadForm,
    entries: Option<usize>,
    enabled: bool,
) -> Element<'a, Message> {
    let heading = match entries {
        Some(count) => format!("Playlist options ({} videos)", count),
        None => "Playlist options".to_string(),
    };

    let mut download_all = checkbox("Download all", form.download_all);
    let mut reverse = checkbox("Reverse order", form.reverse);
    if enabled {
        download_all = download_all.on_toggle(Message::DownloadAllToggled);
        reverse = reverse.on_toggle(Message::ReverseToggled);
    }

    let mut start = text_input("Start", &form.start)
        .width(Length::Fixed(90.0))
        .padding(8)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)));
    let mut end = text_input("End", &form.end)
        .width(Length::Fixed(90.0))
        .padding(8)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)));
    // Range fields only apply when not downloading everything
    if enabled && !form.download_all {
        start = start.on_input(Message::StartChanged);
        end = end.on_input(Message::EndChanged);
    }

    column![
        text(heading)
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        row![
            download_all,
            reverse,
            Space::with_width(Length::Fill),
            text("From").size(14),
            start,
            text("to").size(14),
            end,
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    ]
    .spacing(8)
    .into()
}
