//! End-to-end tests for `crestforge quadrant` commands.

mod fixtures;
use fixtures::*;

use serde_json::json;

fn quadrants(env: &TestEnv) -> Vec<serde_json::Value> {
    env.run_json(&["design", "show", "--json"])["quadrants"]
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn test_quadrant_scale_is_clamped() {
    let env = TestEnv::new();
    env.run_ok(&["quadrant", "scale", "1", "5"]);
    env.run_ok(&["quadrant", "scale", "2", "0.1"]);
    env.run_ok(&["quadrant", "scale", "3", "1.25"]);

    let quadrants = quadrants(&env);
    assert_eq!(quadrants[1]["elementScale"], 2.0);
    assert_eq!(quadrants[2]["elementScale"], 0.5);
    assert_eq!(quadrants[3]["elementScale"], 1.25);
}

#[test]
fn test_quadrant_offset_accepts_negative_values() {
    let env = TestEnv::new();
    env.run_ok(&["quadrant", "offset", "0", "-3.5", "4"]);

    let quadrants = quadrants(&env);
    assert_eq!(quadrants[0]["centerOffset"], json!({ "x": -3.5, "y": 4.0 }));
}

#[test]
fn test_quadrant_swap_moves_only_elements() {
    let env = TestEnv::new();
    env.run_ok(&["quadrant", "scale", "0", "1.5"]);
    env.run_ok(&["quadrant", "swap", "0", "1"]);

    let quadrants = quadrants(&env);
    assert_eq!(quadrants[0]["elementId"], "mountains");
    assert_eq!(quadrants[1]["elementId"], "briefcase");
    assert_eq!(quadrants[0]["elementScale"], 1.5);
    assert_eq!(quadrants[0]["isFilled"], true);
    assert_eq!(quadrants[1]["isFilled"], false);
}

#[test]
fn test_quadrant_reorder_moves_whole_quadrants() {
    let env = TestEnv::new();
    env.run_ok(&["quadrant", "reorder", "3", "2", "1", "0"]);

    let quadrants = quadrants(&env);
    let ids: Vec<&str> = quadrants
        .iter()
        .map(|quadrant| quadrant["elementId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["leaf", "dollar", "mountains", "briefcase"]);
    assert_eq!(quadrants[0]["isFilled"], true);
    assert_eq!(quadrants[1]["isFilled"], false);
}

#[test]
fn test_quadrant_reorder_rejects_non_permutation() {
    let env = TestEnv::new();
    let output = env.run(&["quadrant", "reorder", "0", "0", "1", "2"]);
    assert_exit_code(&output, 1);

    let quadrants = quadrants(&env);
    assert_eq!(quadrants[0]["elementId"], "briefcase");
}

#[test]
fn test_quadrant_filled_toggle_changes_resolution() {
    let env = TestEnv::new();
    env.run_ok(&["quadrant", "filled", "0", "false"]);

    let resolved = env.run_json(&["design", "resolve", "--json"]);
    assert!(resolved["quadrants"][0]["fillColor"].is_null());
    assert_eq!(resolved["quadrants"][0]["isFilled"], false);

    env.run_ok(&["quadrant", "filled", "1", "true"]);
    let resolved = env.run_json(&["design", "resolve", "--json"]);
    assert!(
        resolved["quadrants"][1]["fillColor"].is_null(),
        "only quadrants 0 and 3 carry a fill"
    );
}

#[test]
fn test_quadrant_index_out_of_range() {
    let env = TestEnv::new();
    for args in [
        ["quadrant", "scale", "4", "1"].as_slice(),
        ["quadrant", "swap", "0", "7"].as_slice(),
        ["quadrant", "filled", "9", "true"].as_slice(),
    ] {
        let output = env.run(args);
        assert_exit_code(&output, 1);
    }
    assert!(!env.storage_path().exists());
}
