/*
[INPUT]:  Parsed subcommand and AppConfig
[OUTPUT]: Store mutations / listings printed to stdout
[POS]:    CLI layer - scriptable access to the task store
[UPDATE]: When adding subcommands
*/

pub mod commands;
pub mod init;
pub mod interactive;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::debug;

use twodo_tasks::{JsonFileRepository, Priority, StatusFilter, TaskId, TaskStore, ViewState};

use crate::config::{AppConfig, default_config_path};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task; prompts for text and priority when TEXT is omitted
    Add {
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
        #[arg(short, long, value_name = "PRIORITY")]
        priority: Option<Priority>,
    },
    /// List tasks through the filter/search/sort view
    #[command(alias = "ls")]
    List {
        #[arg(short, long, default_value = "all")]
        filter: StatusFilter,
        #[arg(short, long)]
        search: Option<String>,
        /// Sort by priority (high first), keeping insertion order within a priority
        #[arg(long)]
        sort: bool,
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between pending and done
    Toggle { id: TaskId },
    /// Replace a task's text
    Edit {
        id: TaskId,
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },
    /// Delete a task
    #[command(alias = "delete")]
    Rm { id: TaskId },
    /// Delete every done task
    ClearDone,
    /// Print the weather readout
    Weather,
    /// Write a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Menu-driven task management
    Interactive,
}

pub async fn run_command(
    command: Command,
    config: &AppConfig,
    config_path: Option<&Path>,
) -> Result<()> {
    match command {
        Command::Add { text, priority } => {
            let mut store = open_store(config)?;
            let priority = priority.unwrap_or(config.tasks.default_priority);
            if text.is_empty() {
                commands::prompt_add(&mut store, priority)
            } else {
                commands::run_add(&mut store, &text.join(" "), priority);
                Ok(())
            }
        }
        Command::List {
            filter,
            search,
            sort,
            json,
        } => {
            let store = open_store(config)?;
            let view = ViewState {
                filter,
                search: search.unwrap_or_default(),
                sort_by_priority: sort,
            };
            commands::run_list(&store, &view, json)
        }
        Command::Toggle { id } => {
            commands::run_toggle(&mut open_store(config)?, id);
            Ok(())
        }
        Command::Edit { id, text } => {
            commands::run_edit(&mut open_store(config)?, id, &text.join(" "))
        }
        Command::Rm { id } => {
            commands::run_rm(&mut open_store(config)?, id);
            Ok(())
        }
        Command::ClearDone => {
            commands::run_clear_done(&mut open_store(config)?);
            Ok(())
        }
        Command::Weather => commands::run_weather(&config.weather).await,
        Command::Init { output } => {
            let output = output
                .or_else(|| config_path.map(Path::to_path_buf))
                .or_else(default_config_path)
                .context("could not determine where to write the config file")?;
            init::run_init(output, config)
        }
        Command::Interactive => {
            interactive::run_interactive(&mut open_store(config)?, config.tasks.default_priority)
        }
    }
}

/// Open the task store described by `config`.
pub fn open_store(config: &AppConfig) -> Result<TaskStore> {
    let data_dir = config.data_dir()?;
    let repo = JsonFileRepository::in_dir(&data_dir, &config.storage.key)
        .with_context(|| format!("open task storage in {}", data_dir.display()))?;
    debug!(path = %repo.path().display(), "using task file");
    Ok(TaskStore::open(repo).with_update_policy(config.tasks.update_policy()))
}
