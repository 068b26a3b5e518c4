//! CLI command handlers for Crestforge.
//!
//! This module provides headless, scriptable access to the emblem designer:
//! editing the current design, managing the gallery and recoloring artwork.

pub mod color;
pub mod common;
pub mod config;
pub mod design;
pub mod gallery;
pub mod quadrant;
pub mod recolor;

// Re-export types used by main.rs and tests
pub use color::ColorArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use design::DesignArgs;
pub use gallery::GalleryArgs;
pub use quadrant::QuadrantArgs;
pub use recolor::RecolorArgs;
