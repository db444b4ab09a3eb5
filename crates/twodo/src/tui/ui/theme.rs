use ratatui::style::{Color, Modifier, Style};

use twodo_tasks::Priority;
use twodo_weather::WeatherKind;

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Rgb(0xea, 0x90, 0x99),
        Priority::Medium => Color::Rgb(0xe8, 0xc3, 0x4a),
        Priority::Low => Color::Rgb(0x7c, 0xc0, 0x8c),
    }
}

pub(crate) fn priority_badge_style(priority: Priority) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(priority_color(priority))
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn weather_style(kind: WeatherKind) -> Style {
    match kind {
        WeatherKind::Sunny => Style::default().fg(Color::Yellow),
        WeatherKind::Rainy => Style::default().fg(Color::LightBlue),
        WeatherKind::Standard => Style::default().fg(Color::Gray),
    }
}
