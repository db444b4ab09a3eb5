/*
[INPUT]:  AppState view of the task collection, edit session
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When changing row layout (keep ROW_PREFIX_WIDTH in sync)
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use twodo_tasks::{Task, summarize};

use super::theme::{border_style, focused_border_style, priority_badge_style};
use crate::tui::app::{AppState, Mode};

const HIGHLIGHT_SYMBOL: &str = "> ";
/// Highlight symbol, checkbox and priority badge.
const ROW_PREFIX_WIDTH: u16 = 2 + 4 + 9;

pub(in crate::tui) fn draw_task_list(frame: &mut ratatui::Frame, area: Rect, app: &mut AppState) {
    let summary = summarize(app.store.tasks(), &app.view);
    let text_width = area.width.saturating_sub(2 + ROW_PREFIX_WIDTH).max(1) as usize;

    let items = {
        let visible = app.visible();
        if visible.is_empty() {
            let message = if app.store.is_empty() {
                "Nothing to do. Press [a] to add a task."
            } else {
                "No tasks match the current view."
            };
            vec![ListItem::new(Span::styled(
                message,
                Style::default().add_modifier(Modifier::DIM),
            ))]
        } else {
            visible
                .iter()
                .map(|task| {
                    let editing = app
                        .editing
                        .as_ref()
                        .filter(|session| session.task_id == task.id);
                    let text = match editing {
                        Some(session) => {
                            let scroll = session.input.visual_scroll(text_width);
                            let value: String =
                                session.input.value().chars().skip(scroll).collect();
                            Span::styled(
                                truncate_to_width(&value, text_width),
                                Style::default().add_modifier(Modifier::UNDERLINED),
                            )
                        }
                        None => task_text(task, text_width),
                    };
                    ListItem::new(row_line(task, text))
                })
                .collect()
        }
    };

    let title = format!("Tasks ({} of {})", summary.shown, summary.total);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if app.mode == Mode::Edit {
                    focused_border_style()
                } else {
                    border_style()
                })
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut app.list_state);

    if let Some(session) = &app.editing {
        let Some(selected) = app.list_state.selected() else {
            return;
        };
        let row = selected.saturating_sub(app.list_state.offset()) as u16;
        let scroll = session.input.visual_scroll(text_width);
        let cursor = session.input.visual_cursor().max(scroll) - scroll;
        let x = area.x + 1 + ROW_PREFIX_WIDTH + cursor as u16;
        let y = area.y + 1 + row;
        if y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
        }
    }
}

fn row_line(task: &Task, text: Span<'static>) -> Line<'static> {
    let checkbox = if task.is_done() { "[x] " } else { "[ ] " };
    Line::from(vec![
        Span::raw(checkbox),
        Span::styled(
            format!(" {:<6} ", task.priority.as_str()),
            priority_badge_style(task.priority),
        ),
        Span::raw(" "),
        text,
    ])
}

fn task_text(task: &Task, width: usize) -> Span<'static> {
    let style = if task.is_done() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    Span::styled(truncate_to_width(&task.text, width), style)
}

/// Cut `text` to `max` display columns, marking the cut with an ellipsis.
pub(in crate::tui) fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max {
            break;
        }
        out.push(ch);
        used += width;
    }
    out.push('…');
    out
}
