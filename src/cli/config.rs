//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, CONFIG_KEYS};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set a configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set a configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Key: paths.data_dir, ui.pretty_json or logging.level
    #[arg(value_name = "KEY")]
    key: String,

    /// New value (empty string clears paths.data_dir)
    #[arg(value_name = "VALUE")]
    value: String,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    data_dir: String,
    pretty_json: bool,
    log_level: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let output = ConfigOutput {
            config_file: Config::config_file_path()
                .map(|path| path.display().to_string())
                .map_err(|e| CliError::io(format!("{e:#}")))?,
            data_dir: config
                .data_dir()
                .map(|path| path.display().to_string())
                .map_err(|e| CliError::io(format!("{e:#}")))?,
            pretty_json: config.ui.pretty_json,
            log_level: config.logging.level,
        };

        if self.json {
            return print_json(&output);
        }

        println!("Config file: {}", output.config_file);
        println!();
        println!("[paths]");
        println!("  data_dir    = {}", output.data_dir);
        println!("[ui]");
        println!("  pretty_json = {}", output.pretty_json);
        println!("[logging]");
        println!("  level       = {}", output.log_level);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if !CONFIG_KEYS.contains(&self.key.as_str()) {
            return Err(CliError::validation(format!(
                "Unknown config key '{}'. Valid keys: {}",
                self.key,
                CONFIG_KEYS.join(", ")
            )));
        }

        let mut config = Config::load().unwrap_or_default();
        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
