use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length};

use crate::backend::{DownloadForm, PlaylistChoice, Selection, SelectionPrompt};
use crate::extractor::StreamDescriptor;
use crate::gui::app::Message;
use crate::gui::components::playlist_options;
use crate::gui::theme;

const COLUMN_WIDTHS: [f32; 6] = [70.0, 70.0, 130.0, 90.0, 90.0, 120.0];

/// Modal stream picker. Holds the pending prompt until confirmed or cancelled.
#[derive(Debug, Clone)]
pub struct FormatPicker {
    prompt: SelectionPrompt,
    /// Currently selected format ID
    pub selected: Option<String>,
}

impl FormatPicker {
    /// The best ranked stream starts selected
    pub fn new(prompt: SelectionPrompt) -> Self {
        let selected = prompt.streams.first().map(|s| s.format_id.clone());
        Self { prompt, selected }
    }

    pub fn select(&mut self, format_id: String) {
        self.selected = Some(format_id);
    }

    /// Deliver the current selection to the waiting workflow. Playlist
    /// options are only sent when the prompt is for a playlist.
    pub fn confirm(self, playlist: PlaylistChoice) -> Option<String> {
        let format_id = self.selected.clone()?;
        let selection = Selection {
            format_id: format_id.clone(),
            playlist: self.prompt.playlist_entries.map(|_| playlist),
        };
        self.prompt.respond(Some(selection));
        Some(format_id)
    }

    pub fn cancel(self) {
        self.prompt.respond(None);
    }

    pub fn view<'a>(&'a self, form: &'a DownloadForm) -> Element<'a, Message> {
        let heading = match &self.prompt.title {
            Some(title) => format!("Select a {} stream: {}", self.prompt.mode.label(), title),
            None => format!("Select a {} stream", self.prompt.mode.label()),
        };

        let header = container(table_row([
            "ID",
            "Format",
            "Resolution",
            "Size",
            "Bitrate",
            "Audio codec",
        ]))
        .padding([6, 8])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::TableHeader)));

        let rows: Vec<Element<Message>> = self
            .prompt
            .streams
            .iter()
            .map(|stream| self.stream_row(stream))
            .collect();

        let actions = row![
            Space::with_width(Length::Fill),
            button(text("Cancel"))
                .padding([10, 20])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                .on_press(Message::PickerCancelled),
            button(text("Confirm"))
                .padding([10, 20])
                .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
                .on_press_maybe(self.selected.as_ref().map(|_| Message::PickerConfirmed)),
        ]
        .spacing(12)
        .align_items(Alignment::Center);

        let mut content = column![
            text(heading)
                .size(18)
                .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
            header,
            scrollable(Column::with_children(rows).spacing(2))
                .height(Length::Fill)
                .style(iced::theme::Scrollable::Custom(Box::new(
                    theme::ScrollableStyle
                ))),
        ]
        .spacing(12);
        if let Some(entries) = self.prompt.playlist_entries {
            content = content.push(playlist_options(form, Some(entries), true));
        }
        let content = content.push(actions);

        container(content)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(theme::PanelContainer)))
            .into()
    }

    fn stream_row(&self, stream: &StreamDescriptor) -> Element<'_, Message> {
        let is_selected = self.selected.as_deref() == Some(stream.format_id.as_str());
        let cells = [
            stream.format_id.clone(),
            stream.ext.clone(),
            stream.resolution_label(),
            stream.size_label(),
            stream.bitrate_label(),
            stream.acodec.clone().unwrap_or_else(|| "N/A".to_string()),
        ];

        button(table_row(cells))
            .width(Length::Fill)
            .padding([6, 8])
            .style(iced::theme::Button::Custom(Box::new(if is_selected {
                theme::RowButton::Selected
            } else {
                theme::RowButton::Normal
            })))
            .on_press(Message::PickerSelected(stream.format_id.clone()))
            .into()
    }
}

fn table_row<'a, S: ToString>(cells: [S; 6]) -> Element<'a, Message> {
    let mut line = iced::widget::Row::new().spacing(8).align_items(Alignment::Center);
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        line = line.push(
            text(cell.to_string())
                .size(13)
                .width(Length::Fixed(width)),
        );
    }
    line.into()
}
