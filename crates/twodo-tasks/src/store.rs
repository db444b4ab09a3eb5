/*
[INPUT]:  Add/toggle/delete/update requests from the UI or CLI
[OUTPUT]: Canonical task collection, written through to its repository
[POS]:    Task Store - the only sanctioned mutator of the collection
[UPDATE]: When adding mutations (each effective one must call persist)
*/

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::id::{Clock, IdGenerator, SystemClock};
use crate::storage::TaskRepository;
use crate::task::{Priority, Task, TaskId, TaskStatus};

/// How `update` treats blank text.
///
/// `add` always rejects blank text; `update` historically did not. The
/// permissive default keeps that behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    #[default]
    Permissive,
    Strict,
}

pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
    repo: Box<dyn TaskRepository>,
    clock: Box<dyn Clock>,
    update_policy: UpdatePolicy,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("ids", &self.ids)
            .field("update_policy", &self.update_policy)
            .finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Load the collection from `repo` using the system clock.
    pub fn open(repo: impl TaskRepository + 'static) -> Self {
        Self::with_clock(repo, SystemClock)
    }

    /// Load the collection from `repo`.
    ///
    /// Unreadable stored state is moved aside (when the backend supports it)
    /// and the store starts empty; the failure is only logged.
    pub fn with_clock(repo: impl TaskRepository + 'static, clock: impl Clock + 'static) -> Self {
        let tasks = match repo.load() {
            Ok(tasks) => dedupe_ids(tasks),
            Err(err) => {
                warn!(error = %err, "failed to load stored tasks; starting empty");
                match repo.quarantine() {
                    Ok(Some(backup)) => {
                        warn!(backup = %backup.display(), "unreadable task data moved aside")
                    }
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "failed to move unreadable task data aside"),
                }
                Vec::new()
            }
        };
        info!(task_count = tasks.len(), "task store loaded");

        let ids = IdGenerator::seeded(tasks.iter().map(|task| task.id).max());
        Self {
            tasks,
            ids,
            repo: Box::new(repo),
            clock: Box::new(clock),
            update_policy: UpdatePolicy::default(),
        }
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a pending task. Blank text is ignored.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<TaskId> {
        if text.trim().is_empty() {
            debug!("ignoring add with blank text");
            return None;
        }
        let Some(id) = self.ids.next(self.clock.now_millis()) else {
            warn!("task id range exhausted; refusing to add");
            return None;
        };
        self.tasks.push(Task::new(id, text, priority));
        info!(task_id = id, priority = %priority, "task added");
        self.persist();
        Some(id)
    }

    /// `add` with the creation form's default priority.
    pub fn add_default(&mut self, text: &str) -> Option<TaskId> {
        self.add(text, Priority::default())
    }

    /// Flip pending/done. Returns the new status, or `None` for an unknown id.
    pub fn toggle(&mut self, id: TaskId) -> Option<TaskStatus> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.status = task.status.toggled();
        let status = task.status;
        info!(task_id = id, status = %status, "task toggled");
        self.persist();
        Some(status)
    }

    /// Remove a task, keeping the order of the rest.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        info!(task_id = id, "task deleted");
        self.persist();
        true
    }

    /// Replace a task's text verbatim. Returns whether anything changed.
    pub fn update(&mut self, id: TaskId, new_text: &str) -> bool {
        if self.update_policy == UpdatePolicy::Strict && new_text.trim().is_empty() {
            debug!(task_id = id, "strict policy rejected blank update");
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.text = new_text.to_string();
        info!(task_id = id, "task updated");
        self.persist();
        true
    }

    /// Drop every done task in a single write. Returns how many were removed.
    pub fn clear_done(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.is_done());
        let removed = before - self.tasks.len();
        if removed > 0 {
            info!(removed, "cleared done tasks");
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.tasks) {
            warn!(error = %err, "failed to save tasks");
        }
    }
}

/// Keep the first occurrence of each id; hand-edited files can repeat one.
fn dedupe_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::with_capacity(tasks.len());
    let before = tasks.len();
    let tasks: Vec<Task> = tasks.into_iter().filter(|task| seen.insert(task.id)).collect();
    if tasks.len() != before {
        warn!(dropped = before - tasks.len(), "dropped tasks with duplicate ids");
    }
    tasks
}
