/*
[INPUT]:  AppState for one frame
[OUTPUT]: Full-screen layout: header, compose bar, view controls, task list, footer
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod compose;
mod controls;
mod footer;
mod header;
mod help;
mod logs;
mod task_list;
mod theme;

use ratatui::layout::{Constraint, Direction, Layout};

use compose::draw_compose;
use controls::{draw_controls, draw_search};
use footer::draw_footer;
use header::draw_header;
use help::draw_help;
use logs::draw_logs;
use task_list::draw_task_list;

use super::app::{AppState, Mode};

const LOG_PANEL_HEIGHT: u16 = 8;

pub(super) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ];
    if app.show_search {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(3));
    if app.show_logs {
        constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(3));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut slot = 0;
    let mut next = || {
        let rect = layout[slot];
        slot += 1;
        rect
    };

    draw_header(frame, next(), app);
    draw_compose(frame, next(), app);
    draw_controls(frame, next(), app);
    if app.show_search {
        draw_search(frame, next(), app);
    }
    draw_task_list(frame, next(), app);
    if app.show_logs {
        draw_logs(frame, next(), &app.log_buffer);
    }
    draw_footer(frame, next(), app);

    if app.mode == Mode::Help {
        draw_help(frame, area);
    }
}
