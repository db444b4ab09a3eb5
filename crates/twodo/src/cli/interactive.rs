/*
[INPUT]:  Task store and user input via CLI menus
[OUTPUT]: Store mutations
[POS]:    CLI interactive flow
[UPDATE]: When adding store operations worth a menu entry
*/

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use twodo_tasks::{Priority, StatusFilter, TaskId, TaskStore, ViewState, visible_tasks};

use crate::cli::commands::{format_row, prompt_add, run_clear_done, run_list, run_toggle};

pub fn run_interactive(store: &mut TaskStore, default_priority: Priority) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("twodo").bold().cyan());

    let mut view = ViewState::default();
    loop {
        let actions = [
            "List tasks",
            "Add task",
            "Toggle task",
            "Edit task",
            "Delete task",
            "Clear done tasks",
            "Change filter",
            "Search",
            "Toggle priority sort",
            "Exit",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt(format!(
                "Select action [filter: {}, sort: {}{}]",
                view.filter,
                if view.sort_by_priority { "priority" } else { "added" },
                if view.search.is_empty() {
                    String::new()
                } else {
                    format!(", search: {:?}", view.search)
                }
            ))
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => run_list(store, &view, false)?,
            1 => prompt_add(store, default_priority)?,
            2 => {
                if let Some(id) = pick_task(store, &view, &theme, "Toggle which task?")? {
                    run_toggle(store, id);
                }
            }
            3 => edit_task(store, &view, &theme)?,
            4 => delete_task(store, &view, &theme)?,
            5 => run_clear_done(store),
            6 => {
                let labels: Vec<&str> = StatusFilter::ALL.iter().map(|f| f.label()).collect();
                let current = StatusFilter::ALL
                    .iter()
                    .position(|f| *f == view.filter)
                    .unwrap_or_default();
                let picked = Select::with_theme(&theme)
                    .with_prompt("Show")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                view.filter = StatusFilter::ALL[picked];
            }
            7 => {
                let search: String = Input::with_theme(&theme)
                    .with_prompt("Search (blank to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                view.set_search(search);
            }
            8 => view.toggle_sort(),
            _ => return Ok(()),
        }
    }
}

fn pick_task(
    store: &TaskStore,
    view: &ViewState,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<TaskId>> {
    let shown = visible_tasks(store.tasks(), view);
    if shown.is_empty() {
        println!("{}", style("No tasks found.").yellow());
        return Ok(None);
    }
    let items: Vec<String> = shown.iter().map(|task| format_row(task)).collect();
    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(picked.map(|index| shown[index].id))
}

fn edit_task(store: &mut TaskStore, view: &ViewState, theme: &ColorfulTheme) -> Result<()> {
    let Some(id) = pick_task(store, view, theme, "Edit which task?")? else {
        return Ok(());
    };
    let current = store.get(id).map(|task| task.text.clone()).unwrap_or_default();
    let text: String = Input::with_theme(theme)
        .with_prompt("New text")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    if !store.update(id, &text) {
        println!("{}", style("Task not updated.").yellow());
    }
    Ok(())
}

fn delete_task(store: &mut TaskStore, view: &ViewState, theme: &ColorfulTheme) -> Result<()> {
    let Some(id) = pick_task(store, view, theme, "Delete which task?")? else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt("Delete this task?")
        .default(false)
        .interact()?;
    if confirmed && store.delete(id) {
        println!("{}", style("Task deleted.").green());
    }
    Ok(())
}
