//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use crestforge::constants::{CONFIG_DIR_ENV, GALLERY_FILE_NAME, STORAGE_FILE_NAME};
use crestforge::models::DesignConfiguration;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the crestforge binary
pub fn crestforge_bin() -> String {
    std::env::var("CARGO_BIN_EXE_crestforge")
        .unwrap_or_else(|_| env!("CARGO_BIN_EXE_crestforge").to_string())
}

/// An isolated config/data directory for one test.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    /// Creates a fresh, empty environment.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Config (and default data) directory.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a Command with the isolated config directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(crestforge_bin());
        cmd.env(CONFIG_DIR_ENV, self.dir());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Runs a command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command, asserting exit code 0, and returns stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "`crestforge {}` should succeed. stderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Runs a command with `--json` output and parses stdout.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("Should parse JSON output")
    }

    /// Path of the persisted current design.
    pub fn storage_path(&self) -> PathBuf {
        self.dir().join(STORAGE_FILE_NAME)
    }

    /// Path of the gallery file.
    pub fn gallery_path(&self) -> PathBuf {
        self.dir().join(GALLERY_FILE_NAME)
    }

    /// Reads the raw storage file.
    pub fn storage_json(&self) -> Value {
        let content = fs::read_to_string(self.storage_path()).expect("Storage file should exist");
        serde_json::from_str(&content).expect("Storage file should be JSON")
    }

    /// Writes a file inside the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }
}

/// Asserts that a command exited with the given code.
pub fn assert_exit_code(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stdout: {} stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// The built-in default design as JSON.
pub fn default_design_json() -> Value {
    serde_json::to_value(DesignConfiguration::default()).expect("Default design serializes")
}

/// A design in the first persisted shape: numeric version, old base color
/// keys, `elementOffset`, positional fields and element objects.
pub fn legacy_v1_design() -> Value {
    json!({
        "version": 1,
        "name": "Legacy Crest",
        "baseColor": { "h": 30, "s": 40, "l": 50 },
        "availableElements": [
            { "id": "briefcase", "name": "Briefcase" },
            { "id": "mountains", "name": "Sierra Nevada" },
            { "id": "dollar", "name": "Dollar" },
            { "id": "leaf", "name": "Leaf" }
        ],
        "quadrants": [
            { "elementId": "leaf", "elementScale": 1.5, "elementOffset": { "x": 2, "y": -1 }, "isFilled": true, "position": 0, "quadrantCenter": { "x": 0, "y": 0 } },
            { "elementId": "mountains", "elementScale": 1, "elementOffset": { "x": 0, "y": 0 }, "isFilled": false, "position": 1 },
            { "elementId": "dollar", "elementScale": 1, "elementOffset": { "x": 0, "y": 0 }, "isFilled": false, "position": 2 },
            { "elementId": "briefcase", "elementScale": 1, "elementOffset": { "x": 0, "y": 0 }, "isFilled": true, "position": 3 }
        ],
        "baseDesign": {
            "fillColorForFilledQuadrants": { "h": 210, "s": 100, "l": 50 },
            "elementColorOverGold": { "h": 0, "s": 0, "l": 100 },
            "elementColorOverFill": { "h": 0, "s": 0, "l": 90 }
        },
        "twoToneDesign": null
    })
}

/// A decorative element fragment wrapped the way source artwork ships.
pub const WRAPPED_LEAF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="emblem-logo">
    <g id="elements">
      <g id="leaf">
        <rect width="100" height="100" style="fill:none"/>
        <path d="M10 10L90 90" fill="#000000"/>
      </g>
    </g>
  </g>
</svg>"##;

/// A base fragment with fill and stroke in attributes and style.
pub const BASE_FRAGMENT: &str = r##"<g id="base"><path d="M0 0" fill="#111111" stroke="#222222" style="stroke-width:2;stroke:#222222"/><path d="M1 1" fill="none"/></g>"##;
