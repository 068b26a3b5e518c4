//! End-to-end tests for `crestforge config` commands.

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let env = TestEnv::new();
    let stdout = env.run_ok(&["config", "show"]);

    assert!(stdout.contains("[paths]"));
    assert!(stdout.contains("pretty_json = true"));
    assert!(stdout.contains("level       = warn"));
}

#[test]
fn test_config_show_json_schema() {
    let env = TestEnv::new();
    let result = env.run_json(&["config", "show", "--json"]);

    assert!(result["config_file"].as_str().unwrap().ends_with("config.toml"));
    assert_eq!(
        result["data_dir"].as_str().unwrap(),
        env.dir().display().to_string()
    );
    assert_eq!(result["pretty_json"], true);
    assert_eq!(result["log_level"], "warn");
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_pretty_json() {
    let env = TestEnv::new();
    env.run_ok(&["config", "set", "ui.pretty_json", "false"]);

    let result = env.run_json(&["config", "show", "--json"]);
    assert_eq!(result["pretty_json"], false);
    assert!(env.dir().join("config.toml").exists());

    let exported = env.run_ok(&["design", "export"]);
    assert_eq!(exported.trim_end().lines().count(), 1, "compact export is one line");
}

#[test]
fn test_config_set_data_dir_moves_storage() {
    let env = TestEnv::new();
    let data_dir = env.dir().join("designs");
    env.run_ok(&["config", "set", "paths.data_dir", data_dir.to_str().unwrap()]);

    env.run_ok(&["color", "base", "#00ff00"]);
    assert!(data_dir.join("crestforge-storage.json").exists());
    assert!(!env.storage_path().exists());
}

#[test]
fn test_config_set_invalid_values() {
    let env = TestEnv::new();

    let output = env.run(&["config", "set", "ui.pretty_json", "maybe"]);
    assert_exit_code(&output, 1);

    let output = env.run(&["config", "set", "logging.level", "crestforge=loud"]);
    assert_exit_code(&output, 1);

    let output = env.run(&["config", "set", "ui.theme", "dark"]);
    assert_exit_code(&output, 1);

    assert!(!env.dir().join("config.toml").exists());
}

#[test]
fn test_config_set_log_level() {
    let env = TestEnv::new();
    env.run_ok(&["config", "set", "logging.level", "crestforge=info"]);

    let result = env.run_json(&["config", "show", "--json"]);
    assert_eq!(result["log_level"], "crestforge=info");
}
