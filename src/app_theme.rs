use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::user_settings::ThemeMode;

pub fn get_theme(mode: &ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::custom(
            "Dark".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.12, 0.14, 0.18),
                text: Color::from_rgb(0.95, 0.96, 0.98),
                primary: Color::from_rgb(0.3, 0.55, 0.95),
                success: Color::from_rgb(0.13, 0.65, 0.37),
                danger: Color::from_rgb(0.9, 0.26, 0.26),
            },
        ),
        ThemeMode::Light => Theme::custom(
            "Light".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.95, 0.95, 0.97),
                text: Color::from_rgb(0.1, 0.1, 0.1),
                primary: Color::from_rgb(0.2, 0.4, 0.9),
                success: Color::from_rgb(0.1, 0.7, 0.3),
                danger: Color::from_rgb(0.9, 0.2, 0.2),
            },
        ),
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.098, 0.529, 0.329))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.098, 0.529, 0.329),
                width: 2.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 8.0,
            },
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.122, 0.655, 0.408))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.122, 0.655, 0.408),
                width: 2.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.098, 0.529, 0.329, 0.4),
                offset: Vector::new(0.0, 6.0),
                blur_radius: 12.0,
            },
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.078, 0.420, 0.263))),
            text_color: Color::WHITE,
            border: Border {
                color: Color::from_rgb(0.078, 0.420, 0.263),
                width: 2.0,
                radius: 8.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.3, 0.3))),
            text_color: Color::from_rgb(0.5, 0.5, 0.5),
            border: Border {
                color: Color::from_rgb(0.4, 0.4, 0.4),
                width: 2.0,
                radius: 8.0.into(),
            },
            shadow: Shadow::default(),
        },
    }
}

pub fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.palette();

    let background = match status {
        button::Status::Hovered => Color::from_rgb(1.0, 0.4, 0.4),
        button::Status::Pressed => Color::from_rgb(0.8, 0.2, 0.2),
        _ => palette.danger,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            color: background,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}

pub fn error_panel_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();

    container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(palette.danger)),
        border: Border {
            color: palette.danger,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}

pub fn plate_text_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();

    container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(palette.success)),
        border: Border {
            color: palette.success,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}

pub fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();

    container::Style {
        text_color: Some(palette.text),
        background: Some(Background::Color(Color {
            a: 0.05,
            ..palette.text
        })),
        border: Border {
            color: Color {
                a: 0.2,
                ..palette.text
            },
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow::default(),
    }
}
