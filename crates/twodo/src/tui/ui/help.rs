use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tasks",
        &[
            ("a / i", "Compose a new task (Tab cycles priority)"),
            ("Space / x", "Toggle done"),
            ("e / Enter", "Edit text in place"),
            ("d / Del", "Delete task"),
            ("C", "Clear all done tasks"),
        ],
    ),
    (
        "View",
        &[
            ("f", "Cycle filter: all, pending, done"),
            ("1 / 2 / 3", "Show all / pending / done"),
            ("/", "Search (Esc hides and clears)"),
            ("s", "Toggle priority sort"),
            ("L", "Toggle log panel"),
        ],
    ),
    (
        "Navigation",
        &[
            ("j / ↓", "Move selection down"),
            ("k / ↑", "Move selection up"),
            ("g / G", "First / last task"),
            ("q / Esc", "Quit"),
        ],
    ),
];

/// Render the help overlay showing all keyboard shortcuts
pub(in crate::tui) fn draw_help(frame: &mut ratatui::Frame, area: Rect) {
    let popup_area = centered_rect(area, 70, 80);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan);

    let mut content = Vec::new();
    for (title, keys) in SECTIONS {
        content.push(Line::from(Span::styled(*title, section_style)));
        for (key, action) in *keys {
            content.push(Line::from(vec![
                Span::styled(format!("  {key:<12}"), key_style),
                Span::raw(*action),
            ]));
        }
        content.push(Line::from(""));
    }
    content.push(Line::from(Span::styled(
        "Press ? or Esc to close...",
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
