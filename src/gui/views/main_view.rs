//! Main view: URL, mode, playlist options, progress and status

use crate::backend::DownloadForm;
use crate::downloader::DownloadMode;
use crate::gui::app::Message;
use crate::gui::components::{playlist_options, progress_bar, url_input};
use crate::gui::theme;
use iced::widget::{button, column, container, radio, row, text, Row, Space};
use iced::{Alignment, Element, Length};

/// Create the main view
pub fn main_view<'a>(
    form: &'a DownloadForm,
    url_error: Option<&'a str>,
    show_playlist_options: bool,
    playlist_entries: Option<usize>,
    busy: bool,
    progress: f32,
    status_message: &'a str,
) -> Element<'a, Message> {
    let mode_row = DownloadMode::all().into_iter().fold(
        Row::new().spacing(20).align_items(Alignment::Center),
        |line, mode| {
            line.push(
                radio(mode.label(), mode, Some(form.mode), Message::ModeSelected)
                    .size(16)
                    .text_size(14),
            )
        },
    );

    let mut body = column![
        text("Download Video")
            .size(26)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        url_input(&form.url, url_error, !busy),
        column![
            text("Download type")
                .size(13)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            mode_row,
        ]
        .spacing(8),
    ]
    .spacing(18);

    if show_playlist_options {
        body = body.push(playlist_options(form, playlist_entries, !busy));
    }

    let download_button = button(
        text(if busy { "Working..." } else { "Download" }).size(16),
    )
    .on_press_maybe((!busy && !form.url.trim().is_empty()).then_some(Message::DownloadPressed))
    .padding([12, 28])
    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)));

    body = body
        .push(row![Space::with_width(Length::Fill), download_button])
        .push(progress_bar(progress))
        .push(
            text(status_message)
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        );

    container(body)
        .padding(28)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer)))
        .into()
}
