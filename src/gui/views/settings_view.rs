//! Settings view implementation

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

/// Merge containers offered in the settings panel
pub const CONTAINER_FORMATS: [&str; 3] = ["mp4", "mkv", "webm"];

/// Create the settings view
pub fn settings_view<'a>(download_path: &'a str, format: &'a str) -> Element<'a, Message> {
    let download_location_section = column![
        text("Download Location")
            .size(16)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        row![
            text_input("Folder for downloaded files", download_path)
                .on_input(Message::DownloadPathChanged)
                .padding(10)
                .width(Length::Fill)
                .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle))),
            button(text("Browse...").size(14))
                .on_press(Message::BrowseDownloadPath)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            button(text("Open").size(14))
                .on_press(Message::OpenDownloadFolder)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        ]
        .spacing(10)
        .align_items(Alignment::Center),
    ]
    .spacing(10);

    let options: Vec<String> = CONTAINER_FORMATS.iter().map(|f| f.to_string()).collect();
    let format_section = column![
        text("Video container")
            .size(16)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        text("Used when video and audio are merged into one file")
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        pick_list(options, Some(format.to_string()), Message::FormatChanged)
            .width(Length::Fixed(160.0))
            .padding(8),
    ]
    .spacing(8);

    let save_button = button(text("Save Settings").size(16))
        .on_press(Message::SaveSettings)
        .padding([12, 24])
        .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)));

    column![
        text("Settings")
            .size(26)
            .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        container(column![download_location_section, format_section].spacing(24))
            .padding(24)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer))),
        row![Space::with_width(Length::Fill), save_button],
    ]
    .spacing(20)
    .width(Length::Fill)
    .into()
}
