//! End-to-end tests for `crestforge gallery` commands.

mod fixtures;
use fixtures::*;

fn list(env: &TestEnv) -> Vec<serde_json::Value> {
    env.run_json(&["gallery", "list", "--json"])
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn test_gallery_empty_list() {
    let env = TestEnv::new();
    assert!(list(&env).is_empty());
    assert!(env.run_ok(&["gallery", "list"]).contains("No saved designs"));
}

#[test]
fn test_gallery_save_and_load() {
    let env = TestEnv::new();
    env.run_ok(&["color", "base", "#ff0000"]);
    env.run_ok(&["gallery", "save", "--name", "Red Crest"]);

    let entries = list(&env);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Red Crest");
    assert_eq!(entries[0]["isActive"], true);
    assert_eq!(entries[0]["isFavorite"], false);

    env.run_ok(&["design", "reset"]);
    env.run_ok(&["gallery", "load", "Red Crest"]);
    let design = env.run_json(&["design", "show", "--json"]);
    assert_eq!(design["baseColor"]["s"], 100.0);
    assert_eq!(design["baseColor"]["l"], 50.0);
}

#[test]
fn test_gallery_save_defaults_to_design_name() {
    let env = TestEnv::new();
    env.run_ok(&["gallery", "save"]);
    assert_eq!(list(&env)[0]["name"], "Default Design");
}

#[test]
fn test_gallery_favorite_duplicate_rename_delete() {
    let env = TestEnv::new();
    env.run_ok(&["gallery", "save", "--name", "Crest"]);
    let id = list(&env)[0]["id"].as_str().unwrap().to_string();

    env.run_ok(&["gallery", "favorite", &id]);
    env.run_ok(&["gallery", "duplicate", "Crest"]);

    let entries = list(&env);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["isFavorite"], true);
    assert_eq!(entries[1]["name"], "Crest (Copy)");
    assert_eq!(entries[1]["isFavorite"], false);
    assert_eq!(entries[1]["isSystemPreset"], false);
    assert_ne!(entries[1]["id"], entries[0]["id"]);

    let favorites = env.run_json(&["gallery", "list", "--json", "--favorites"]);
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    env.run_ok(&["gallery", "rename", "Crest (Copy)", "Second"]);
    assert_eq!(list(&env)[1]["name"], "Second");

    env.run_ok(&["gallery", "delete", &id]);
    let entries = list(&env);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Second");
    assert_eq!(entries[0]["isActive"], false, "active id cleared with the deleted design");
}

#[test]
fn test_gallery_export_and_import() {
    let env = TestEnv::new();
    env.run_ok(&["color", "two-tone", "enable"]);
    env.run_ok(&["gallery", "save", "--name", "Two Tone"]);

    let export_path = env.dir().join("two-tone.json");
    env.run_ok(&[
        "gallery",
        "export",
        "Two Tone",
        "--output",
        export_path.to_str().unwrap(),
    ]);
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert!(exported["twoToneDesign"].is_object());

    env.run_ok(&["gallery", "import", export_path.to_str().unwrap()]);
    let entries = list(&env);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["name"], "Default Design");
    assert_eq!(entries[1]["isActive"], true);
}

#[test]
fn test_gallery_import_invalid_payload() {
    let env = TestEnv::new();
    let path = env.write_file("bad.json", r#"{"name":"Broken"}"#);
    let output = env.run(&["gallery", "import", path.to_str().unwrap()]);
    assert_exit_code(&output, 1);
    assert!(list(&env).is_empty());
}

#[test]
fn test_gallery_unknown_design() {
    let env = TestEnv::new();
    for args in [
        ["gallery", "load", "missing"].as_slice(),
        ["gallery", "delete", "missing"].as_slice(),
        ["gallery", "favorite", "00000000-0000-0000-0000-000000000000"].as_slice(),
        ["gallery", "export", "missing"].as_slice(),
    ] {
        let output = env.run(args);
        assert_exit_code(&output, 3);
    }
}

#[test]
fn test_gallery_file_shape() {
    let env = TestEnv::new();
    env.run_ok(&["gallery", "save", "--name", "Stored"]);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(env.gallery_path()).unwrap()).unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["activeDesignId"], raw["designs"][0]["id"]);
    assert_eq!(raw["designs"][0]["state"]["name"], "Default Design");
    assert!(raw["designs"][0]["timestamp"].is_string());
}
