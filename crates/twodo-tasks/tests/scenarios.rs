/*
[INPUT]:  TaskStore backed by a JSON file in a temp dir
[OUTPUT]: End-to-end checks of store mutations and the view pipeline
[POS]:    Integration test layer - twodo-tasks public API
[UPDATE]: When adding store operations or view controls
*/

use tempfile::TempDir;
use twodo_tasks::{
    JsonFileRepository, Priority, StatusFilter, TaskStatus, TaskStore, ViewState, visible_tasks,
};

fn texts(tasks: &[&twodo_tasks::Task]) -> Vec<String> {
    tasks.iter().map(|task| task.text.clone()).collect()
}

#[test]
fn add_toggle_filter_sort_scenario() {
    let tmp_dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::in_dir(tmp_dir.path(), "tasks").unwrap();
    let mut store = TaskStore::open(repo.clone());
    assert!(store.is_empty());

    store.add("Buy milk", Priority::Low);
    store.add("Call dad", Priority::High);

    let tasks = store.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].text, "Buy milk");
    assert_eq!(tasks[0].priority, Priority::Low);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
    assert_eq!(tasks[1].text, "Call dad");
    assert_eq!(tasks[1].priority, Priority::High);
    assert_eq!(tasks[1].status, TaskStatus::Pending);

    let first_id = tasks[0].id;
    store.toggle(first_id);
    assert_eq!(store.get(first_id).unwrap().status, TaskStatus::Done);

    let mut view = ViewState {
        filter: StatusFilter::Pending,
        ..ViewState::default()
    };
    assert_eq!(texts(&visible_tasks(store.tasks(), &view)), vec!["Call dad"]);

    view.filter = StatusFilter::All;
    view.sort_by_priority = true;
    assert_eq!(
        texts(&visible_tasks(store.tasks(), &view)),
        vec!["Call dad", "Buy milk"]
    );

    // state survives a restart
    let reopened = TaskStore::open(repo);
    assert_eq!(reopened.tasks(), store.tasks());
}

#[test]
fn search_scenario_preserves_order() {
    let tmp_dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::in_dir(tmp_dir.path(), "tasks").unwrap();
    let mut store = TaskStore::open(repo);
    for text in ["Buy milk", "Buy bread", "Call dad"] {
        store.add_default(text);
    }

    let view = ViewState {
        search: "buy".to_string(),
        ..ViewState::default()
    };
    assert_eq!(
        texts(&visible_tasks(store.tasks(), &view)),
        vec!["Buy milk", "Buy bread"]
    );
}

#[test]
fn corrupt_file_is_set_aside_and_store_starts_empty() {
    let tmp_dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::in_dir(tmp_dir.path(), "tasks").unwrap();
    std::fs::write(repo.path(), "{ not valid").unwrap();

    let mut store = TaskStore::open(repo.clone());
    assert!(store.is_empty());
    assert!(tmp_dir.path().join("tasks.json.bak").exists());

    store.add("fresh start", Priority::Medium);
    assert_eq!(TaskStore::open(repo).len(), 1);
}
