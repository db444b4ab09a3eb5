/*
[INPUT]:  Task collection plus ViewState (filter, search, sort flag)
[OUTPUT]: Ordered task references to display, summary counts
[POS]:    View Pipeline - pure derivation, recomputed on every render
[UPDATE]: When adding view controls (keep them serde-defaulted)
*/

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Done,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Pending, StatusFilter::Done];

    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TaskStatus::Pending,
            StatusFilter::Done => status == TaskStatus::Done,
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Done,
            StatusFilter::Done => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Done => "Done",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Done => "done",
        })
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" | "open" => Ok(StatusFilter::Pending),
            "done" | "completed" => Ok(StatusFilter::Done),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

/// View controls consumed by [`visible_tasks`]. Never touches the tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub filter: StatusFilter,
    pub search: String,
    pub sort_by_priority: bool,
}

impl ViewState {
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    pub fn toggle_sort(&mut self) {
        self.sort_by_priority = !self.sort_by_priority;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Whether a task passes both the status filter and the search.
    pub fn admits(&self, task: &Task) -> bool {
        self.filter.matches(task.status) && text_matches(&task.text, &self.search)
    }
}

fn text_matches(text: &str, search: &str) -> bool {
    search.is_empty() || text.to_lowercase().contains(&search.to_lowercase())
}

/// Tasks to display: status filter, then case-insensitive search, then an
/// optional stable sort by priority rank.
pub fn visible_tasks<'a>(tasks: &'a [Task], view: &ViewState) -> Vec<&'a Task> {
    let mut shown: Vec<&Task> = tasks.iter().filter(|task| view.admits(task)).collect();

    if view.sort_by_priority {
        // sort_by_key is stable: equal priorities keep insertion order
        shown.sort_by_key(|task| task.priority.rank());
    }
    shown
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub total: usize,
    pub pending: usize,
    pub done: usize,
    pub shown: usize,
}

pub fn summarize(tasks: &[Task], view: &ViewState) -> ViewSummary {
    let done = tasks.iter().filter(|task| task.is_done()).count();
    ViewSummary {
        total: tasks.len(),
        pending: tasks.len() - done,
        done,
        shown: tasks.iter().filter(|task| view.admits(task)).count(),
    }
}
