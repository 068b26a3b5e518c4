//! Shared CLI types: errors, exit codes and storage helpers.

use crate::config::Config;
use crate::models::HslColor;
use crate::parser::parse_color_string;
use crate::services::{DesignStorage, DesignStore, Gallery};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input or rejected operation
    ValidationError = 1,
    /// File system or serialization failure
    IoError = 2,
    /// Referenced design or file does not exist
    NotFound = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process terminates with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Missing resource (exit code 3).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::NotFound,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, falling back to defaults when it is unreadable.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %format!("{err:#}"), "Failed to load configuration, using defaults");
        Config::default()
    })
}

/// Resolves the data directory from the configuration.
pub fn data_dir(config: &Config) -> CliResult<PathBuf> {
    config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))
}

/// Opens design storage and loads the current design.
pub fn load_store() -> CliResult<(Config, DesignStorage, DesignStore)> {
    let config = load_config();
    let storage = DesignStorage::new(&data_dir(&config)?);
    let store = storage
        .load()
        .map_err(|e| CliError::io(format!("Failed to load design: {e:#}")))?;
    Ok((config, storage, store))
}

/// Saves the current design.
pub fn save_store(storage: &DesignStorage, store: &DesignStore) -> CliResult<()> {
    storage
        .save(store)
        .map_err(|e| CliError::io(format!("Failed to save design: {e:#}")))
}

/// Opens the gallery.
pub fn open_gallery(config: &Config) -> CliResult<Gallery> {
    Gallery::open(&data_dir(config)?)
        .map_err(|e| CliError::io(format!("Failed to open gallery: {e:#}")))
}

/// Parses a color argument in any supported notation.
pub fn parse_color_arg(input: &str) -> CliResult<HslColor> {
    parse_color_string(input).ok_or_else(|| {
        CliError::validation(format!(
            "Invalid color '{input}'. Use #rrggbb, #rgb, rgb(r, g, b), hsl(h, s%, l%) or a color name"
        ))
    })
}

/// Turns a rejected store command into a validation error.
pub fn ensure_applied(applied: bool, message: impl Into<String>) -> CliResult<()> {
    if applied {
        Ok(())
    } else {
        Err(CliError::validation(message))
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
