use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::theme::{border_style, focused_border_style, priority_badge_style};
use crate::tui::app::{AppState, Mode};

const BADGE_WIDTH: u16 = 9;

pub(in crate::tui) fn draw_compose(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let focused = app.mode == Mode::Compose;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(if focused {
            "New task [Enter] add  [Tab] priority  [Esc] done"
        } else {
            "New task [a]"
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BADGE_WIDTH), Constraint::Min(1)])
        .split(inner);

    let priority = app.compose.priority;
    let badge = Paragraph::new(Span::styled(
        format!(" {:<6} ", priority.as_str()),
        priority_badge_style(priority),
    ));
    frame.render_widget(badge, columns[0]);

    let input = &app.compose.input;
    let text_area = columns[1];
    let width = text_area.width.max(1) as usize;
    let scroll = input.visual_scroll(width);
    let widget = if input.value().is_empty() && !focused {
        Paragraph::new(Span::styled(
            "What needs doing today?",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Paragraph::new(input.value()).scroll((0, scroll as u16))
    };
    frame.render_widget(widget, text_area);

    if focused {
        let cursor = input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position((text_area.x + cursor as u16, text_area.y));
    }
}
