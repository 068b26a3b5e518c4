//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_BINARY_NAME, CONFIG_DIR_ENV};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the stored design and gallery (defaults to the config directory)
    pub data_dir: Option<PathBuf>,
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Indent exported JSON
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

const fn default_pretty_json() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            pretty_json: default_pretty_json(),
        }
    }
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set (e.g., "warn", "crestforge=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - `$CRESTFORGE_CONFIG_DIR/config.toml` when the variable is set
/// - Linux: `~/.config/crestforge/config.toml`
/// - macOS: `~/Library/Application Support/crestforge/config.toml`
/// - Windows: `%APPDATA%\crestforge\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Output preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging preferences
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 3] = ["paths.data_dir", "ui.pretty_json", "logging.level"];

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory, honoring the `CRESTFORGE_CONFIG_DIR` override.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory where the design and gallery are stored.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read config file: {}", config_path.display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", config_path.display())
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, &config_path).with_context(|| {
            format!("Failed to rename temp config file to: {}", config_path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `logging.level` is a valid filter directive
    /// - `paths.data_dir` is not an existing regular file
    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid logging level: '{}'", self.logging.level))?;

        if let Some(dir) = &self.paths.data_dir {
            if dir.is_file() {
                anyhow::bail!("Data directory is a file: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Sets a value by dotted key (see [`CONFIG_KEYS`]) and validates the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "paths.data_dir" => {
                self.paths.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "ui.pretty_json" => {
                self.ui.pretty_json = value
                    .parse()
                    .with_context(|| format!("Expected true or false, got '{value}'"))?;
            }
            "logging.level" => value.clone_into(&mut self.logging.level),
            _ => anyhow::bail!(
                "Unknown config key '{key}'. Valid keys: {}",
                CONFIG_KEYS.join(", ")
            ),
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.data_dir, None);
        assert!(config.ui.pretty_json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.logging.level = "crestforge=debug,warn".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "crestforge=notalevel".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file");
        fs::write(&file, "").unwrap();

        let mut config = Config::new();
        config.paths.data_dir = Some(file);
        assert!(config.validate().is_err());

        config.paths.data_dir = Some(temp_dir.path().join("missing"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_set() {
        let mut config = Config::new();
        config.set("ui.pretty_json", "false").unwrap();
        assert!(!config.ui.pretty_json);

        config.set("paths.data_dir", "/tmp/designs").unwrap();
        assert_eq!(config.paths.data_dir, Some(PathBuf::from("/tmp/designs")));
        config.set("paths.data_dir", "").unwrap();
        assert_eq!(config.paths.data_dir, None);

        config.set("logging.level", "info").unwrap();
        assert_eq!(config.logging.level, "info");

        assert!(config.set("ui.pretty_json", "maybe").is_err());
        assert!(config.set("ui.theme", "dark").is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.ui.pretty_json = false;
        config.paths.data_dir = Some(temp_dir.path().join("data"));

        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        let content = fs::read_to_string(&config_file).unwrap();
        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[ui]\npretty_json = false\n").unwrap();
        assert!(!loaded.ui.pretty_json);
        assert_eq!(loaded.logging.level, "warn");
        assert_eq!(loaded.paths.data_dir, None);
    }
}
