//! Custom theme definitions for the application

use iced::widget::{button, container, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Palette ---

pub const CANVAS: Color = Color::from_rgb(0.965, 0.965, 0.973);
pub const SURFACE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const SIDEBAR: Color = Color::from_rgb(0.929, 0.933, 0.945);

// Brand red for primary actions
pub const BRAND: Color = Color::from_rgb(0.863, 0.149, 0.149);
pub const BRAND_HOVER: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const BRAND_SOFT: Color = Color::from_rgb(0.996, 0.902, 0.902);

pub const SLATE_900: Color = Color::from_rgb(0.059, 0.090, 0.165); // Primary text
pub const SLATE_600: Color = Color::from_rgb(0.278, 0.333, 0.412); // Secondary text
pub const SLATE_400: Color = Color::from_rgb(0.580, 0.639, 0.722); // Placeholder
pub const SLATE_200: Color = Color::from_rgb(0.886, 0.910, 0.941); // Borders
pub const SLATE_100: Color = Color::from_rgb(0.945, 0.961, 0.976); // Hover

pub const DANGER: Color = Color::from_rgb(0.725, 0.110, 0.110);

pub const TEXT_PRIMARY: Color = SLATE_900;
pub const TEXT_SECONDARY: Color = SLATE_600;

// --- Container Styles ---

pub struct CanvasContainer;

impl container::StyleSheet for CanvasContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(SLATE_900),
            background: Some(Background::Color(CANVAS)),
            ..Default::default()
        }
    }
}

pub struct PanelContainer;

impl container::StyleSheet for PanelContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(SLATE_900),
            background: Some(Background::Color(SURFACE)),
            border: Border {
                color: SLATE_200,
                width: 1.0,
                radius: 10.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
        }
    }
}

pub struct SidebarContainer;

impl container::StyleSheet for SidebarContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(SLATE_600),
            background: Some(Background::Color(SIDEBAR)),
            border: Border {
                color: SLATE_200,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        }
    }
}

/// Header row of the stream picker table
pub struct TableHeader;

impl container::StyleSheet for TableHeader {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(SLATE_600),
            background: Some(Background::Color(SLATE_100)),
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// --- Button Styles ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BRAND)),
            text_color: Color::WHITE,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.863, 0.149, 0.149, 0.25),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 6.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(BRAND_HOVER)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SLATE_200)),
            text_color: SLATE_400,
            shadow: Shadow::default(),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SURFACE)),
            text_color: SLATE_900,
            border: Border {
                radius: 8.0.into(),
                color: SLATE_200,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SLATE_100)),
            ..self.active(style)
        }
    }
}

pub enum NavButton {
    Active,
    Inactive,
}

impl button::StyleSheet for NavButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = match self {
            Self::Active => (Some(Background::Color(BRAND_SOFT)), BRAND),
            Self::Inactive => (None, SLATE_600),
        };
        button::Appearance {
            background,
            text_color,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            Self::Active => self.active(style),
            Self::Inactive => button::Appearance {
                background: Some(Background::Color(SLATE_100)),
                text_color: SLATE_900,
                ..self.active(style)
            },
        }
    }
}

/// A clickable row in the stream picker
pub enum RowButton {
    Selected,
    Normal,
}

impl button::StyleSheet for RowButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let background = match self {
            Self::Selected => Some(Background::Color(BRAND_SOFT)),
            Self::Normal => None,
        };
        button::Appearance {
            background,
            text_color: SLATE_900,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            Self::Selected => self.active(style),
            Self::Normal => button::Appearance {
                background: Some(Background::Color(SLATE_100)),
                ..self.active(style)
            },
        }
    }
}

// --- Input Styles ---

pub struct InputStyle;

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SURFACE),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: SLATE_200,
            },
            icon_color: SLATE_400,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: BRAND,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        SLATE_400
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        SLATE_900
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.863, 0.149, 0.149, 0.2)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(SLATE_100),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        SLATE_400
    }
}

pub struct InputErrorStyle;

impl text_input::StyleSheet for InputErrorStyle {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> text_input::Appearance {
        let base = InputStyle.active(style);
        text_input::Appearance {
            border: Border {
                color: DANGER,
                ..base.border
            },
            icon_color: DANGER,
            ..base
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }

    fn placeholder_color(&self, style: &Self::Style) -> Color {
        InputStyle.placeholder_color(style)
    }

    fn value_color(&self, style: &Self::Style) -> Color {
        InputStyle.value_color(style)
    }

    fn selection_color(&self, style: &Self::Style) -> Color {
        InputStyle.selection_color(style)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        InputStyle.disabled(style)
    }

    fn disabled_color(&self, style: &Self::Style) -> Color {
        InputStyle.disabled_color(style)
    }
}

// --- Scrollable Styles ---

pub struct ScrollableStyle;

impl scrollable::StyleSheet for ScrollableStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: Some(Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: SLATE_200,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(
        &self,
        style: &Self::Style,
        is_mouse_over_scrollbar: bool,
    ) -> scrollable::Appearance {
        let active = self.active(style);
        if !is_mouse_over_scrollbar {
            return active;
        }
        scrollable::Appearance {
            scrollbar: scrollable::Scrollbar {
                scroller: scrollable::Scroller {
                    color: SLATE_400,
                    ..active.scrollbar.scroller
                },
                ..active.scrollbar
            },
            ..active
        }
    }
}

// --- Progress Bar Styles ---

pub struct ProgressBarStyle;

impl iced::widget::progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> iced::widget::progress_bar::Appearance {
        iced::widget::progress_bar::Appearance {
            background: Background::Color(SLATE_200),
            bar: Background::Color(BRAND),
            border_radius: 4.0.into(),
        }
    }
}
