/*
[INPUT]:  CLI arguments, YAML configuration file, TWODO_* environment
[OUTPUT]: One-shot task commands or the interactive TUI
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

mod cli;
mod config;
mod logging;
mod tui;
mod weather;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::cli::Command;
use crate::config::AppConfig;

const CLI_LOG_LEVEL: &str = "warn";
const TUI_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "twodo", version, about = "Today's 2DO: a small terminal task list")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Directory holding the task file (overrides storage.data_dir)
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = Some(data_dir);
    }

    match args.command {
        None => {
            let log_level = args.log_level.as_deref().unwrap_or(TUI_LOG_LEVEL);
            tui::run_tui(config, log_level).await
        }
        Some(command) => {
            let log_level = args.log_level.as_deref().unwrap_or(CLI_LOG_LEVEL);
            logging::init_cli_tracing(log_level)?;
            info!(command = ?command, "running command");
            cli::run_command(command, &config, args.config_path.as_deref()).await
        }
    }
}
