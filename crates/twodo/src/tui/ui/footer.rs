use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::theme::{border_style, key_style};
use crate::tui::app::{AppState, Mode};

fn hints(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Normal => &[
            ("[a]", " Add  "),
            ("[Space]", " Done  "),
            ("[e]", " Edit  "),
            ("[d]", " Delete  "),
            ("[/]", " Search  "),
            ("[?]", " Help  "),
            ("[q]", " Quit  "),
        ],
        Mode::Compose => &[
            ("[Enter]", " Add  "),
            ("[Tab]", " Priority  "),
            ("[Esc]", " Done  "),
        ],
        Mode::Edit => &[("[Enter]", " Save  "), ("[Esc]", " Cancel  ")],
        Mode::Search => &[
            ("[Enter]", " Keep  "),
            ("[Esc]", " Clear & hide  "),
        ],
        Mode::Help => &[("[Esc]", " Close  ")],
    }
}

pub(in crate::tui) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let mut spans = Vec::new();
    for (key, label) in hints(app.mode) {
        spans.push(Span::styled(*key, key_style()));
        spans.push(Span::raw(*label));
    }
    spans.push(Span::raw(format!("| {}", app.status_message)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(Line::from(spans)))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
