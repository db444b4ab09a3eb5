use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::theme::{border_style, header_style, weather_style};
use crate::tui::app::{AppState, WeatherPanel};

const TITLE: &str = " Today's 2DO ";

pub(in crate::tui) fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let weather = weather_line(&app.weather);
    let weather_width = weather.width() as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(TITLE.width() as u16), Constraint::Length(weather_width)])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(TITLE, header_style())));
    frame.render_widget(title, columns[0]);
    frame.render_widget(
        Paragraph::new(weather).alignment(Alignment::Right),
        columns[1],
    );
}

fn weather_line(panel: &WeatherPanel) -> Line<'static> {
    match panel {
        WeatherPanel::Disabled => Line::default(),
        WeatherPanel::Loading => Line::from(Span::styled(
            "fetching weather...",
            Style::default().add_modifier(Modifier::DIM),
        )),
        WeatherPanel::Ready(report) => {
            let mut spans = Vec::new();
            if let Some(location) = &report.location {
                spans.push(Span::styled(
                    format!("{location}  "),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            spans.push(Span::styled(report.summary(), weather_style(report.kind())));
            spans.push(Span::raw(" "));
            Line::from(spans)
        }
    }
}
