use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use twodo_tasks::{Priority, Task, TaskId, TaskStatus, TaskStore, ViewState, summarize, visible_tasks};

use crate::config::WeatherConfig;
use crate::weather::fetch_report;

pub fn run_add(store: &mut TaskStore, text: &str, priority: Priority) {
    match store.add(text, priority) {
        Some(id) => println!(
            "{} {} {}",
            style("Added").green().bold(),
            style(format!("#{id}")).dim(),
            text
        ),
        None if text.trim().is_empty() => {
            println!("{}", style("Nothing added: task text is blank.").yellow())
        }
        None => println!("{}", style("Nothing added: no free task id left.").yellow()),
    }
}

pub fn prompt_add(store: &mut TaskStore, default_priority: Priority) -> Result<()> {
    let theme = ColorfulTheme::default();
    let text: String = Input::with_theme(&theme)
        .with_prompt("What needs doing?")
        .allow_empty(true)
        .interact_text()?;
    let priority = select_priority(&theme, default_priority)?;
    run_add(store, &text, priority);
    Ok(())
}

pub(crate) fn select_priority(theme: &ColorfulTheme, default: Priority) -> Result<Priority> {
    let labels: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
    let default_index = Priority::ALL
        .iter()
        .position(|p| *p == default)
        .unwrap_or_default();
    let selection = Select::with_theme(theme)
        .with_prompt("Priority")
        .items(&labels)
        .default(default_index)
        .interact()?;
    Ok(Priority::ALL[selection])
}

pub fn run_list(store: &TaskStore, view: &ViewState, json: bool) -> Result<()> {
    let shown = visible_tasks(store.tasks(), view);
    if json {
        let body = serde_json::to_string_pretty(&shown).context("serialize task list")?;
        println!("{body}");
        return Ok(());
    }

    if shown.is_empty() {
        println!("{}", style("No tasks to show.").dim());
    }
    for task in &shown {
        println!("{}", format_row(task));
    }

    let summary = summarize(store.tasks(), view);
    println!(
        "{}",
        style(format!(
            "{} shown | {} pending | {} done | {} total",
            summary.shown, summary.pending, summary.done, summary.total
        ))
        .dim()
    );
    Ok(())
}

pub(crate) fn format_row(task: &Task) -> String {
    let checkbox = if task.is_done() { "[x]" } else { "[ ]" };
    let priority = match task.priority {
        Priority::High => style(format!("{:<6}", task.priority.as_str())).red(),
        Priority::Medium => style(format!("{:<6}", task.priority.as_str())).yellow(),
        Priority::Low => style(format!("{:<6}", task.priority.as_str())).green(),
    };
    let text = if task.is_done() {
        style(task.text.as_str()).strikethrough().dim()
    } else {
        style(task.text.as_str())
    };
    format!(
        "{} {} {} {}",
        style(format!("{:>14}", task.id)).dim(),
        checkbox,
        priority,
        text
    )
}

fn not_found(id: TaskId) {
    println!("{}", style(format!("No task with id {id}.")).yellow());
}

pub fn run_toggle(store: &mut TaskStore, id: TaskId) {
    match store.toggle(id) {
        Some(TaskStatus::Done) => println!("{} #{id}", style("Done").green().bold()),
        Some(TaskStatus::Pending) => println!("{} #{id}", style("Reopened").cyan().bold()),
        None => not_found(id),
    }
}

pub fn run_edit(store: &mut TaskStore, id: TaskId, text: &str) -> Result<()> {
    let Some(current) = store.get(id).map(|task| task.text.clone()) else {
        not_found(id);
        return Ok(());
    };

    let text = if text.is_empty() {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("New text")
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?
    } else {
        text.to_string()
    };

    if store.update(id, &text) {
        println!("{} #{id}", style("Updated").green().bold());
    } else {
        println!(
            "{}",
            style("Not updated: blank text is rejected by the strict update policy.").yellow()
        );
    }
    Ok(())
}

pub fn run_rm(store: &mut TaskStore, id: TaskId) {
    if store.delete(id) {
        println!("{} #{id}", style("Deleted").red().bold());
    } else {
        not_found(id);
    }
}

pub fn run_clear_done(store: &mut TaskStore) {
    let removed = store.clear_done();
    println!("Cleared {} done task(s).", style(removed).bold());
}

pub async fn run_weather(config: &WeatherConfig) -> Result<()> {
    let report = fetch_report(config).await;
    match &report.location {
        Some(location) => println!("{} {}", style(location).cyan().bold(), report.summary()),
        None => println!("{}", report.summary()),
    }
    Ok(())
}
