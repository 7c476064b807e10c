//! Progress bar component

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{progress_bar as iced_progress_bar, row, text};
use iced::{Alignment, Element, Length};

/// Bar over 0–100 with the percentage beside it
pub fn progress_bar(percent: f32) -> Element<'static, Message> {
    let percent = percent.clamp(0.0, 100.0);

    row![
        iced_progress_bar(0.0..=100.0, percent)
            .height(Length::Fixed(8.0))
            .style(iced::theme::ProgressBar::Custom(Box::new(
                theme::ProgressBarStyle
            ))),
        text(format!("{:>5.1}%", percent))
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
    ]
    .spacing(10)
    .align_items(Alignment::Center)
    .into()
}
