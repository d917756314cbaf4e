// Integration tests for `pipette-prefs` against a throwaway preferences file.
// Run with: cargo test -p pipette-cli --test prefs_tests -- --nocapture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn prefs(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pipette-prefs"));
    cmd.env_remove("PIPETTE_PREFS_FILE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn run(config: &Path, args: &[&str]) -> Output {
    prefs(config).args(args).output().expect("run pipette-prefs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn config_in(dir: &TempDir) -> PathBuf {
    dir.path().join("preferences.json")
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn get_returns_defaults_without_creating_file() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let output = run(&config, &["get", "stayOnTop"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "true");

    let output = run(&config, &["get", "menuBarItemClickAction"]);
    assert_eq!(stdout(&output), "showMenu");

    let output = run(&config, &["get", "pickColor", "--json"]);
    assert_eq!(stdout(&output), "null");

    assert!(!config.exists());
}

#[test]
fn list_json_has_every_key() {
    let dir = TempDir::new().unwrap();
    let output = run(&config_in(&dir), &["list", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 16);
    assert_eq!(object["preferredColorFormat"], "hex");
    assert_eq!(object["colorFormatToCopyAfterPicking"], "none");
    assert_eq!(object["shownColorFormats"], serde_json::json!(["hex", "hsl", "rgb", "lch", "nsSRGB", "uiSRGB"]));
    assert_eq!(object["recentlyPickedColors"], serde_json::json!([]));
    assert_eq!(object["copyColorAfterPicking"], false);
    assert!(object.get("showAccessibilityColorName").is_none());
}

// ---------------------------------------------------------------------------
// Set / reset
// ---------------------------------------------------------------------------

#[test]
fn set_persists_and_list_marks_changes() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    assert!(run(&config, &["set", "stayOnTop", "false"]).status.success());
    assert!(run(&config, &["set", "menuBarItemClickAction", "toggleWindow"]).status.success());
    assert!(run(&config, &["set", "pickColor", "cmd+shift+c"]).status.success());

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(stored["stayOnTop"], false);
    assert_eq!(stored["menuBarItemClickAction"], "toggleWindow");
    assert_eq!(stored["pickColor"], "cmd+shift+c");

    let listing = stdout(&run(&config, &["list"]));
    let changed: Vec<&str> = listing
        .lines()
        .filter(|l| l.starts_with('*'))
        .filter_map(|l| l.split_whitespace().nth(1))
        .collect();
    assert_eq!(changed, ["menuBarItemClickAction", "stayOnTop", "pickColor"]);
}

#[test]
fn set_rejects_unknown_key_and_bad_value() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let output = run(&config, &["set", "showInDock", "true"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown preference key"));

    let output = run(&config, &["set", "preferredColorFormat", "cmyk"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("preferredColorFormat"), "stderr: {err}");
    assert!(err.contains("hex | hsl | rgb | lch | nsSRGB | uiSRGB"), "stderr: {err}");

    assert!(!config.exists());
}

#[test]
fn reset_single_key_and_all() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    run(&config, &["set", "largerText", "true"]);
    run(&config, &["set", "uppercaseHexColor", "true"]);

    assert!(run(&config, &["reset", "largerText"]).status.success());
    assert_eq!(stdout(&run(&config, &["get", "largerText"])), "false");
    assert_eq!(stdout(&run(&config, &["get", "uppercaseHexColor"])), "true");

    assert!(run(&config, &["reset", "--all"]).status.success());
    assert_eq!(stdout(&run(&config, &["get", "uppercaseHexColor"])), "false");

    // Neither a key nor --all is a usage error from clap
    assert_eq!(run(&config, &["reset"]).status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// Recent colors
// ---------------------------------------------------------------------------

#[test]
fn recent_colors_are_capped_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    for hex in ["#111111", "#222222", "#333333", "#444444", "#555555", "#666666", "#777777"] {
        assert!(run(&config, &["recent", "add", hex]).status.success());
    }
    assert!(run(&config, &["recent", "add", "#333"]).status.success());

    let listed = stdout(&run(&config, &["recent", "list"]));
    assert_eq!(
        listed.lines().collect::<Vec<_>>(),
        ["#222222", "#444444", "#555555", "#666666", "#777777", "#333333"]
    );

    let output = run(&config, &["recent", "add", "blue"]);
    assert_eq!(output.status.code(), Some(2));

    assert!(run(&config, &["recent", "clear"]).status.success());
    assert_eq!(stdout(&run(&config, &["recent", "list"])), "");
}

// ---------------------------------------------------------------------------
// Lenient loading
// ---------------------------------------------------------------------------

#[test]
fn wrongly_typed_value_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(&config, r#"{"stayOnTop": "yes", "largerText": true, "oldKey": 1}"#).unwrap();

    assert_eq!(stdout(&run(&config, &["get", "stayOnTop"])), "true");
    assert_eq!(stdout(&run(&config, &["get", "largerText"])), "true");
}

#[test]
fn non_object_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    fs::write(&config, "[]").unwrap();

    let output = run(&config, &["list"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("hint:"));
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[test]
fn toml_export_then_import_into_fresh_store() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let exported = dir.path().join("backup.toml");

    run(&config, &["set", "colorFormatToCopyAfterPicking", "lch"]);
    run(&config, &["set", "shownColorFormats", r#"["lch","hex"]"#]);
    run(&config, &["recent", "add", "#3b82f6"]);

    let output = run(&config, &["export", "--format", "toml", "-o", exported.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let toml = fs::read_to_string(&exported).unwrap();
    assert!(toml.contains("colorFormatToCopyAfterPicking = \"lch\""));

    let fresh = dir.path().join("fresh").join("preferences.json");
    let output = run(&fresh, &["import", exported.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(stdout(&run(&fresh, &["get", "colorFormatToCopyAfterPicking"])), "lch");
    assert_eq!(stdout(&run(&fresh, &["get", "shownColorFormats"])), r#"["hex","lch"]"#);
    assert_eq!(stdout(&run(&fresh, &["recent", "list"])), "#3b82f6");
}

#[test]
fn import_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let output = run(&config_in(&dir), &["import", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
}

// ---------------------------------------------------------------------------
// Formats / path
// ---------------------------------------------------------------------------

#[test]
fn formats_json_lists_titles_and_tips() {
    let dir = TempDir::new().unwrap();
    let output = run(&config_in(&dir), &["formats", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let titles: Vec<&str> = value["colorFormats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Hex", "HSL", "RGB", "LCH", "NSColor sRGB", "UIColor sRGB"]);
    assert_eq!(value["copyColorFormats"][0]["title"], "None");
    assert_eq!(value["menuBarItemClickActions"][0]["tip"], "Right-click to show the color sampler");
}

#[test]
fn path_prints_config_override() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let output = run(&config, &["path"]);
    assert_eq!(stdout(&output), config.display().to_string());
}
