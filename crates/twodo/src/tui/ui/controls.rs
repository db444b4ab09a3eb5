/*
[INPUT]:  ViewState and summary counts
[OUTPUT]: Filter tabs, sort indicator and search box
[POS]:    TUI UI view controls
[UPDATE]: When adding view controls
*/

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use twodo_tasks::{StatusFilter, summarize};

use super::theme::{border_style, focused_border_style, header_style};
use crate::tui::app::{AppState, Mode};

pub(in crate::tui) fn draw_controls(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(22)])
        .split(area);

    let summary = summarize(app.store.tasks(), &app.view);
    let titles = StatusFilter::ALL
        .iter()
        .map(|filter| {
            let count = match filter {
                StatusFilter::All => summary.total,
                StatusFilter::Pending => summary.pending,
                StatusFilter::Done => summary.done,
            };
            Line::from(format!("{} {count}", filter.label()))
        })
        .collect::<Vec<_>>();
    let selected = StatusFilter::ALL
        .iter()
        .position(|filter| *filter == app.view.filter)
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Show [f]"),
        )
        .highlight_style(header_style())
        .select(selected);
    frame.render_widget(tabs, columns[0]);

    let (label, style) = if app.view.sort_by_priority {
        ("priority", Style::default().add_modifier(Modifier::BOLD))
    } else {
        ("added", Style::default().add_modifier(Modifier::DIM))
    };
    let sort = Paragraph::new(Line::from(vec![Span::raw("by "), Span::styled(label, style)]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Sort [s]"),
        );
    frame.render_widget(sort, columns[1]);
}

pub(in crate::tui) fn draw_search(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let focused = app.mode == Mode::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title("Search [/]");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let scroll = app.search_input.visual_scroll(width);
    let input = Paragraph::new(app.search_input.value()).scroll((0, scroll as u16));
    frame.render_widget(input, inner);

    if focused {
        let cursor = app.search_input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position((inner.x + cursor as u16, inner.y));
    }
}
