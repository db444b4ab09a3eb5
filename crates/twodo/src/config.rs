/*
[INPUT]:  Built-in defaults, optional YAML file, TWODO_* environment variables
[OUTPUT]: Parsed AppConfig
[POS]:    Configuration layer
[UPDATE]: When adding new configuration options (keep every section serde-defaulted)
*/

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use twodo_tasks::{Priority, UpdatePolicy};
use twodo_weather::{ClientConfig, LocationSource};

pub const APP_DIR_NAME: &str = "twodo";
pub const ENV_PREFIX: &str = "TWODO";

/// Top-level configuration for twodo
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub tasks: TasksConfig,
    pub weather: WeatherConfig,
    pub ui: UiConfig,
}

/// Where the task collection lives
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `<key>.json`; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Storage key (file stem)
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: "tasks".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Reject edits that blank out a task's text
    pub strict_update: bool,
    /// Priority preselected in the compose bar
    pub default_priority: Priority,
}

impl TasksConfig {
    pub fn update_policy(&self) -> UpdatePolicy {
        if self.strict_update {
            UpdatePolicy::Strict
        } else {
            UpdatePolicy::Permissive
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub units: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            enabled: true,
            api_key: None,
            base_url: client.base_url,
            units: client.units,
            latitude: None,
            longitude: None,
            timeout_secs: client.timeout.as_secs(),
        }
    }
}

impl WeatherConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            units: self.units.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..ClientConfig::default()
        }
    }

    pub fn location(&self) -> LocationSource {
        LocationSource::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval in milliseconds
    pub tick_ms: u64,
    /// Show the log panel on startup
    pub show_logs: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            show_logs: false,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the YAML file, then `TWODO_*` env vars.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("read configuration sources")?;
        let app: AppConfig = config
            .try_deserialize()
            .context("parse configuration")?;
        Ok(app)
    }

    /// Directory for task data and the log file.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| anyhow!("Could not determine data directory"))?
                .join(APP_DIR_NAME)),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config to YAML")
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.storage.key, "tasks");
        assert!(!config.tasks.strict_update);
        assert_eq!(config.tasks.default_priority, Priority::Low);
        assert_eq!(config.tasks.update_policy(), UpdatePolicy::Permissive);
        assert!(config.weather.enabled);
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.ui.tick_ms, 250);
    }

    #[test]
    fn partial_yaml_file_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "tasks:\n  strict_update: true\n  default_priority: high\nweather:\n  latitude: 59.33\n  longitude: 18.07\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.tasks.update_policy(), UpdatePolicy::Strict);
        assert_eq!(config.tasks.default_priority, Priority::High);
        assert_eq!(config.weather.latitude, Some(59.33));
        assert_eq!(config.storage.key, "tasks");
        assert_eq!(config.ui.tick_ms, 250);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = AppConfig::default();
        config.weather.api_key = Some("abc123".to_string());
        config.tasks.strict_update = true;

        let yaml = config.to_yaml().unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.weather.api_key.as_deref(), Some("abc123"));
        assert!(parsed.tasks.strict_update);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/twodo-test"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/twodo-test"));
    }
}
