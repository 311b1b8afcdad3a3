//! Tests of the `debtscore` binary.

mod common;

use assert_cmd::Command;
use common::{branchy_function, create_project};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn debtscore() -> Command {
    let mut cmd = Command::cargo_bin("debtscore").unwrap();
    cmd.env("DEBTSCORE_QUIET", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_analyze_json_to_stdout() {
    let project = create_project(&[("src/branchy.ts", &branchy_function("branchy", 11))]);

    let output = debtscore()
        .args(["analyze", "--format", "json"])
        .arg(project.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("Output is not valid JSON");
    assert_eq!(json["score"]["overall"], 85.0);
    assert_eq!(json["metadata"]["files_analyzed"], 1);
    assert_eq!(json["findings"][0]["rule_id"], "complexity");
    assert_eq!(json["score"]["categories"].as_array().unwrap().len(), 5);
}

#[test]
fn test_analyze_current_directory_finds_cycles() {
    let project = create_project(&[
        ("src/a.ts", "import { b } from './b';\nexport const a = () => b();\n"),
        ("src/b.ts", "import { a } from './a';\nexport const b = () => a();\n"),
    ]);

    let output = debtscore()
        .args(["analyze", "--format", "json", "."])
        .current_dir(project.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules: Vec<&str> = json["findings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|finding| finding["rule_id"].as_str())
        .collect();
    assert_eq!(rules, vec!["circular-dependency"]);
    assert_eq!(json["metadata"]["files_analyzed"], 2);
}

#[test]
fn test_analyze_writes_output_file() {
    let project = create_project(&[("src/a.ts", "export const a = 1;\n")]);
    let out = project.path().join("report.json");

    debtscore()
        .args(["analyze", "--format", "json", "--output"])
        .arg(&out)
        .arg(project.path())
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json["score"]["overall"], 100.0);
}

#[test]
fn test_terminal_report() {
    let project = create_project(&[("src/branchy.ts", &branchy_function("branchy", 11))]);

    let output = debtscore()
        .arg("analyze")
        .arg(project.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DEBTSCORE ANALYSIS REPORT"));
    assert!(stdout.contains("branchy"));
}

#[test]
fn test_fail_under_sets_exit_code() {
    let project = create_project(&[("src/branchy.ts", &branchy_function("branchy", 11))]);

    debtscore()
        .args(["analyze", "--fail-under", "90"])
        .arg(project.path())
        .assert()
        .failure();

    debtscore()
        .args(["analyze", "--fail-under", "80"])
        .arg(project.path())
        .assert()
        .success();
}

#[test]
fn test_weights_flag() {
    let project = create_project(&[("src/branchy.ts", &branchy_function("branchy", 11))]);

    let output = debtscore()
        .args([
            "analyze",
            "--format",
            "json",
            "--weights",
            "complexity=1,size=0,type-safety=0,duplication=0,circular-dependency=0",
        ])
        .arg(project.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["score"]["overall"], 50.0);
}

#[test]
fn test_invalid_weight_is_an_error() {
    let project = create_project(&[("src/a.ts", "export const a = 1;\n")]);

    debtscore()
        .args(["analyze", "--weights", "complexity=-1"])
        .arg(project.path())
        .assert()
        .failure();
}

#[test]
fn test_config_file_is_honored() {
    let project = create_project(&[
        ("src/branchy.ts", &branchy_function("branchy", 11)),
        (".debtscore.toml", "[scan]\nignore = [\"**/branchy.ts\"]\n"),
    ]);

    let output = debtscore()
        .args(["analyze", "--format", "json"])
        .arg(project.path())
        .output()
        .unwrap();

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata"]["files_analyzed"], 0);
    assert_eq!(json["metadata"]["notes"][0], "No source files found");
}

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    debtscore()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    assert!(temp.path().join(".debtscore.toml").exists());

    debtscore()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure();

    debtscore()
        .args(["init", "--force"])
        .current_dir(temp.path())
        .assert()
        .success();
}
