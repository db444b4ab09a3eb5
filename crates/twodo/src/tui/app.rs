/*
[INPUT]:  TaskStore, view controls, weather readout, log buffer
[OUTPUT]: AppState helpers for TUI rendering and task actions
[POS]:    TUI app state
[UPDATE]: When adding modes or actions reachable from the keyboard
*/

use ratatui::widgets::ListState;
use tui_input::Input;

use twodo_tasks::{Priority, StatusFilter, Task, TaskId, TaskStore, ViewState, visible_tasks};
use twodo_weather::WeatherReport;

use crate::logging::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Mode {
    Normal,
    Compose,
    Edit,
    Search,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum WeatherPanel {
    Disabled,
    Loading,
    Ready(WeatherReport),
}

/// Creation form: text plus the priority chosen with Tab.
pub(super) struct ComposeForm {
    pub(super) input: Input,
    pub(super) priority: Priority,
}

/// In-place edit of one task; its own buffer so Esc can discard it.
pub(super) struct EditSession {
    pub(super) task_id: TaskId,
    pub(super) input: Input,
}

pub(super) struct AppState {
    pub(super) store: TaskStore,
    pub(super) view: ViewState,
    pub(super) mode: Mode,
    pub(super) compose: ComposeForm,
    pub(super) editing: Option<EditSession>,
    pub(super) search_input: Input,
    pub(super) show_search: bool,
    pub(super) list_state: ListState,
    pub(super) status_message: String,
    pub(super) weather: WeatherPanel,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) show_logs: bool,
    pub(super) default_priority: Priority,
}

impl AppState {
    pub(super) fn new(
        store: TaskStore,
        log_buffer: LogBufferHandle,
        default_priority: Priority,
    ) -> Self {
        let mut app = Self {
            store,
            view: ViewState::default(),
            mode: Mode::Normal,
            compose: ComposeForm {
                input: Input::default(),
                priority: default_priority,
            },
            editing: None,
            search_input: Input::default(),
            show_search: false,
            list_state: ListState::default(),
            status_message: "Ready".to_string(),
            weather: WeatherPanel::Disabled,
            log_buffer,
            show_logs: false,
            default_priority,
        };
        app.clamp_selection();
        app
    }

    pub(super) fn visible(&self) -> Vec<&Task> {
        visible_tasks(self.store.tasks(), &self.view)
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let index = self.list_state.selected()?;
        self.visible().get(index).copied()
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id)
    }

    /// Keep the highlight inside the visible rows after any change.
    pub(super) fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let selected = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(selected.min(len - 1)));
        }
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(index) = self.visible().iter().position(|task| task.id == id) {
            self.list_state.select(Some(index));
        } else {
            self.clamp_selection();
        }
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub(super) fn select_first(&mut self) {
        self.list_state.select(Some(0));
        self.clamp_selection();
    }

    pub(super) fn select_last(&mut self) {
        let len = self.visible().len();
        self.list_state.select(len.checked_sub(1));
    }

    pub(super) fn start_compose(&mut self) {
        self.mode = Mode::Compose;
    }

    pub(super) fn cycle_compose_priority(&mut self) {
        self.compose.priority = self.compose.priority.cycle();
    }

    /// Add the composed task; the form stays open for the next one.
    pub(super) fn submit_compose(&mut self) {
        let text = self.compose.input.value().to_string();
        match self.store.add(&text, self.compose.priority) {
            Some(id) => {
                self.status_message = format!("added '{}'", text.trim());
                self.compose.input.reset();
                self.compose.priority = self.default_priority;
                self.select_task(id);
            }
            None if text.trim().is_empty() => {
                self.status_message = "nothing to add: task text is empty".to_string()
            }
            None => self.status_message = "nothing added: no free task id left".to_string(),
        }
    }

    pub(super) fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(status) = self.store.toggle(id) {
            let text = self.store.get(id).map(|task| task.text.clone()).unwrap_or_default();
            self.status_message = format!("'{text}' marked {status}");
        }
        self.clamp_selection();
    }

    pub(super) fn delete_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if self.store.delete(task.id) {
            self.status_message = format!("deleted '{}'", task.text);
        }
        self.clamp_selection();
    }

    pub(super) fn clear_done(&mut self) {
        let removed = self.store.clear_done();
        self.status_message = format!("cleared {removed} done task(s)");
        self.clamp_selection();
    }

    pub(super) fn begin_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.editing = Some(EditSession {
            task_id: task.id,
            input: Input::new(task.text.clone()),
        });
        self.mode = Mode::Edit;
    }

    pub(super) fn commit_edit(&mut self) {
        let Some(session) = self.editing.take() else {
            self.mode = Mode::Normal;
            return;
        };
        if self.store.update(session.task_id, session.input.value()) {
            self.status_message = "task updated".to_string();
        } else {
            self.status_message = "edit rejected: task text is blank".to_string();
        }
        self.mode = Mode::Normal;
        self.select_task(session.task_id);
    }

    pub(super) fn cancel_edit(&mut self) {
        self.editing = None;
        self.mode = Mode::Normal;
        self.status_message = "edit cancelled".to_string();
    }

    pub(super) fn set_filter(&mut self, filter: StatusFilter) {
        self.view.filter = filter;
        self.clamp_selection();
    }

    pub(super) fn cycle_filter(&mut self) {
        self.set_filter(self.view.filter.next());
    }

    pub(super) fn toggle_sort(&mut self) {
        let selected = self.selected_task_id();
        self.view.toggle_sort();
        match selected {
            Some(id) => self.select_task(id),
            None => self.clamp_selection(),
        }
    }

    pub(super) fn open_search(&mut self) {
        self.show_search = true;
        self.mode = Mode::Search;
    }

    /// Hiding the search box also drops its filter.
    pub(super) fn close_search(&mut self) {
        self.show_search = false;
        self.search_input.reset();
        self.view.clear_search();
        self.mode = Mode::Normal;
        self.clamp_selection();
    }

    pub(super) fn sync_search(&mut self) {
        self.view.set_search(self.search_input.value());
        self.clamp_selection();
    }

    pub(super) fn set_weather(&mut self, report: WeatherReport) {
        self.weather = WeatherPanel::Ready(report);
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::logging::LogBuffer;
    use twodo_tasks::{MemoryRepository, TaskStatus};

    pub(crate) fn app_with(texts: &[(&str, Priority)]) -> AppState {
        let mut store = TaskStore::open(MemoryRepository::new());
        for (text, priority) in texts {
            store.add(text, *priority).unwrap();
        }
        AppState::new(store, LogBuffer::handle(16), Priority::Low)
    }

    #[test]
    fn test_new_selects_first_row_when_tasks_exist() {
        let app = app_with(&[("Buy milk", Priority::Low)]);
        assert_eq!(app.list_state.selected(), Some(0));

        let empty = app_with(&[]);
        assert_eq!(empty.list_state.selected(), None);
    }

    #[test]
    fn test_move_selection_is_clamped() {
        let mut app = app_with(&[("A", Priority::Low), ("B", Priority::Low)]);
        app.move_selection(5);
        assert_eq!(app.list_state.selected(), Some(1));
        app.move_selection(-5);
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_last();
        assert_eq!(app.selected_task().unwrap().text, "B");
    }

    #[test]
    fn test_submit_compose_resets_form() {
        let mut app = app_with(&[]);
        app.compose.input = Input::new("Call dad".to_string());
        app.cycle_compose_priority();
        assert_eq!(app.compose.priority, Priority::High);

        app.submit_compose();
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].priority, Priority::High);
        assert_eq!(app.compose.input.value(), "");
        assert_eq!(app.compose.priority, Priority::Low);
        assert_eq!(app.selected_task().unwrap().text, "Call dad");
    }

    #[test]
    fn test_submit_blank_compose_is_ignored() {
        let mut app = app_with(&[]);
        app.compose.input = Input::new("   ".to_string());
        app.submit_compose();
        assert!(app.store.is_empty());
        assert!(app.status_message.contains("empty"));
    }

    #[test]
    fn test_toggle_under_pending_filter_hides_row() {
        let mut app = app_with(&[("A", Priority::Low), ("B", Priority::Low)]);
        app.set_filter(StatusFilter::Pending);
        app.select_last();
        app.toggle_selected();

        assert_eq!(app.store.tasks()[1].status, TaskStatus::Done);
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.status_message, "'B' marked done");
    }

    #[test]
    fn test_edit_commit_and_cancel() {
        let mut app = app_with(&[("Buy milk", Priority::Low)]);
        app.begin_edit();
        assert_eq!(app.mode, Mode::Edit);
        if let Some(session) = app.editing.as_mut() {
            session.input = Input::new("Buy oat milk".to_string());
        }
        app.commit_edit();
        assert_eq!(app.store.tasks()[0].text, "Buy oat milk");
        assert_eq!(app.mode, Mode::Normal);

        app.begin_edit();
        app.cancel_edit();
        assert_eq!(app.store.tasks()[0].text, "Buy oat milk");
        assert!(app.editing.is_none());
    }

    #[test]
    fn test_close_search_clears_filter_text() {
        let mut app = app_with(&[("Buy milk", Priority::Low), ("Call dad", Priority::High)]);
        app.open_search();
        app.search_input = Input::new("MILK".to_string());
        app.sync_search();
        assert_eq!(app.visible().len(), 1);

        app.close_search();
        assert!(app.view.search.is_empty());
        assert_eq!(app.visible().len(), 2);
    }

    #[test]
    fn test_toggle_sort_keeps_selected_task() {
        let mut app = app_with(&[("low", Priority::Low), ("high", Priority::High)]);
        app.select_first();
        app.toggle_sort();
        assert_eq!(app.selected_task().unwrap().text, "low");
        assert_eq!(app.list_state.selected(), Some(1));
    }
}
