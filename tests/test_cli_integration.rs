//! CLI Integration Tests for constellation
//!
//! These tests execute the binary and verify:
//! - Composition output in both formats
//! - Search and list modes
//! - Canvas validation and lookup errors
//! - Config files and output files
//! - The stdio MCP server mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn constellation() -> Command {
    let mut cmd = Command::cargo_bin("constellation").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_compose_defaults_to_json() {
    let output = constellation().arg("orion").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["constellation"], "Orion");
    assert_eq!(value["abbreviation"], "Ori");
    assert_eq!(value["canvas"]["width"], 1024);
    assert_eq!(value["composition"]["focal_points"].as_array().unwrap().len(), 5);
}

#[test]
fn test_compose_markdown() {
    constellation()
        .args(["UMa", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Constellation Composition: Ursa Major"))
        .stdout(predicate::str::contains("## Focal Points"))
        .stdout(predicate::str::contains("## Mythology Themes"));
}

#[test]
fn test_no_mythology_drops_section() {
    constellation()
        .args(["Lyra", "--format", "md", "--no-mythology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Balance"))
        .stdout(predicate::str::contains("## Mythology Themes").not());
}

#[test]
fn test_custom_canvas_is_echoed() {
    let output = constellation()
        .args(["Gemini", "--width", "1920", "--height", "1080"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["canvas"]["width"], 1920);
    assert_eq!(value["canvas"]["height"], 1080);
}

#[test]
fn test_output_is_deterministic() {
    let first = constellation().arg("Aquarius").output().unwrap();
    let second = constellation().arg("Aquarius").output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout, "dispersed points must not vary between runs");
}

// ============================================================================
// Catalog Modes
// ============================================================================

#[test]
fn test_list() {
    constellation()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Available Constellations (22)"))
        .stdout(predicate::str::contains("## Virgo (Vir)"));
}

#[test]
fn test_list_json() {
    let output = constellation().args(["--list", "--format", "json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_count"], 22);
    assert_eq!(value["constellations"][0]["name"], "Andromeda");
}

#[test]
fn test_search_text() {
    constellation()
        .args(["--search", "hunter"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Found 1 Constellation(s)"))
        .stdout(predicate::str::contains("## 1. Orion"));
}

#[test]
fn test_search_shape_only() {
    constellation()
        .args(["--search", "--shape", "dipper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ursa Major"))
        .stdout(predicate::str::contains("Ursa Minor"));
}

#[test]
fn test_search_without_matches() {
    constellation()
        .args(["--search", "dragon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No constellations found"));
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_unknown_constellation_fails() {
    constellation()
        .arg("Pegasuz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("Andromeda, Aquarius"));
}

#[test]
fn test_canvas_too_small_fails() {
    constellation()
        .args(["Orion", "--width", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("canvas_width"));
}

#[test]
fn test_short_name_fails() {
    constellation()
        .arg("Or")
        .assert()
        .failure()
        .stderr(predicate::str::contains("constellation_name"));
}

#[test]
fn test_missing_name_fails() {
    constellation()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--list"));
}

#[test]
fn test_list_conflicts_with_search() {
    constellation().args(["--list", "--search", "x"]).assert().failure();
}

// ============================================================================
// Config and Output Files
// ============================================================================

#[test]
fn test_config_file_widens_bounds() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"canvas": {"min_dimension": 64}}"#).unwrap();

    constellation()
        .args(["Orion", "--width", "100"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 100"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{not json").unwrap();

    constellation()
        .arg("Orion")
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("orion.json");

    constellation()
        .arg("Orion")
        .arg("-o")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("\"constellation\": \"Orion\""));
    assert!(written.ends_with('\n'));
}

#[test]
fn test_version() {
    constellation()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// MCP Server Mode
// ============================================================================

#[test]
fn test_server_mode_answers_requests() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_all_constellations","arguments":{"response_format":"json"}}}"#,
        "\n",
    );

    let output = constellation().arg("--server").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "notifications get no response");

    let init: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(init["result"]["serverInfo"]["name"], "constellation_composer");

    let call: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("\"total_count\": 22"));
}
