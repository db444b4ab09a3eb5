/*
[INPUT]:  Crossterm key events
[OUTPUT]: AppState actions; quit signal
[POS]:    TUI key routing, one handler per mode
[UPDATE]: When changing keybindings (keep the help overlay in sync)
*/

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::InputRequest;

use twodo_tasks::StatusFilter;

use super::app::{AppState, Mode};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Compose => {
            handle_compose_key(app, key);
            false
        }
        Mode::Edit => {
            handle_edit_key(app, key);
            false
        }
        Mode::Search => {
            handle_search_key(app, key);
            false
        }
        Mode::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
            ) {
                app.mode = Mode::Normal;
            }
            false
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('a') | KeyCode::Char('i') => app.start_compose(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('C') => app.clear_done(),
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('1') => app.set_filter(StatusFilter::All),
        KeyCode::Char('2') => app.set_filter(StatusFilter::Pending),
        KeyCode::Char('3') => app.set_filter(StatusFilter::Done),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('L') => app.show_logs = !app.show_logs,
        KeyCode::Char('?') | KeyCode::F(1) => app.mode = Mode::Help,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        _ => {}
    }
    false
}

fn handle_compose_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => app.submit_compose(),
        KeyCode::Tab | KeyCode::BackTab => app.cycle_compose_priority(),
        _ => {
            if let Some(request) = input_request(key) {
                app.compose.input.handle(request);
            }
        }
    }
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        _ => {
            if let (Some(session), Some(request)) = (app.editing.as_mut(), input_request(key)) {
                session.input.handle(request);
            }
        }
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_search(),
        KeyCode::Enter | KeyCode::Down | KeyCode::Up => {
            app.mode = Mode::Normal;
            if key.code != KeyCode::Enter {
                handle_normal_key(app, key);
            }
        }
        _ => {
            if let Some(request) = input_request(key) {
                if app.search_input.handle(request).is_some() {
                    app.sync_search();
                }
            }
        }
    }
}

/// Map a key press onto a line-editing request.
pub(super) fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let request = match key.code {
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('k') if ctrl => InputRequest::DeleteTillEnd,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace if ctrl || alt => InputRequest::DeletePrevWord,
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left if ctrl => InputRequest::GoToPrevWord,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right if ctrl => InputRequest::GoToNextWord,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}
