/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use twodo_tasks::Priority;

use crate::cli::commands::select_priority;
use crate::config::AppConfig;

pub fn run_init(output: PathBuf, current: &AppConfig) -> Result<()> {
    println!("{}", style("Welcome to twodo init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a configuration file.").dim()
    );

    let theme = ColorfulTheme::default();

    if output.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", style("Aborted; nothing written.").yellow());
            return Ok(());
        }
    }

    let mut config = current.clone();

    println!("\n{}", style("--- Storage ---").bold());
    let data_dir: String = Input::with_theme(&theme)
        .with_prompt("Data directory (blank for the platform default)")
        .default(
            config
                .storage
                .data_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;
    config.storage.data_dir = non_blank(data_dir).map(PathBuf::from);

    println!("\n{}", style("--- Tasks ---").bold());
    config.tasks.default_priority = select_priority(&theme, config.tasks.default_priority)?;
    let policies = ["permissive (allow blank edits)", "strict (reject blank edits)"];
    let policy = Select::with_theme(&theme)
        .with_prompt("Edit policy")
        .items(&policies)
        .default(usize::from(config.tasks.strict_update))
        .interact()?;
    config.tasks.strict_update = policy == 1;

    println!("\n{}", style("--- Weather ---").bold());
    config.weather.enabled = Confirm::with_theme(&theme)
        .with_prompt("Show the weather readout?")
        .default(config.weather.enabled)
        .interact()?;
    if config.weather.enabled {
        let api_key: String = Input::with_theme(&theme)
            .with_prompt("OpenWeather API key (blank to skip)")
            .default(config.weather.api_key.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        config.weather.api_key = non_blank(api_key);

        let latitude = prompt_coordinate(&theme, "Latitude", config.weather.latitude)?;
        let longitude = prompt_coordinate(&theme, "Longitude", config.weather.longitude)?;
        config.weather.latitude = latitude;
        config.weather.longitude = longitude;
    }

    let yaml = config.to_yaml()?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );
    if config.tasks.default_priority != Priority::default() {
        println!(
            "New tasks will default to {} priority.",
            style(config.tasks.default_priority).bold()
        );
    }

    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_coordinate(
    theme: &ColorfulTheme,
    prompt: &str,
    current: Option<f64>,
) -> Result<Option<f64>> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(format!("{prompt} (blank for the fallback location)"))
        .default(current.map(|value| value.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() || input.trim().parse::<f64>().is_ok() {
                Ok(())
            } else {
                Err("enter a decimal number".to_string())
            }
        })
        .interact_text()?;
    Ok(non_blank(raw).and_then(|value| value.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_trims() {
        assert_eq!(non_blank("  ".to_string()), None);
        assert_eq!(non_blank(" key ".to_string()).as_deref(), Some("key"));
    }
}
