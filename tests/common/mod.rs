// Test utility module for debtscore integration tests
#![allow(dead_code)]

use debtscore::{analyze_project, AnalysisReport, AnalyzeConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary project from `(relative path, contents)` pairs
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, contents) in files {
        write_file(temp_dir.path(), relative, contents);
    }
    temp_dir
}

/// Like [`create_project`], but below the working directory; also returns
/// the project root as a relative `./name` path
pub fn create_project_in_cwd(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new_in(".").expect("Failed to create temp dir");
    for (relative, contents) in files {
        write_file(temp_dir.path(), relative, contents);
    }
    let name = temp_dir.path().file_name().expect("temp dir has a name");
    let relative = Path::new(".").join(name);
    (temp_dir, relative)
}

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(&path, contents).expect("Failed to write test file");
}

/// Analyze a project with default settings, sequentially
pub fn analyze(root: &Path) -> AnalysisReport {
    let mut config = AnalyzeConfig::new(root);
    config.parallel = false;
    analyze_project(&config).expect("analysis failed")
}

/// A function with `count` sequential `if` statements
pub fn branchy_function(name: &str, count: usize) -> String {
    let mut source = format!("export function {}(value: number): number {{\n", name);
    source.push_str("    let total = 0;\n");
    for i in 0..count {
        source.push_str(&format!("    if (value > {}) {{ total += {}; }}\n", i, i));
    }
    source.push_str("    return total;\n}\n");
    source
}

/// One function returning a left-nested `+` chain of `terms` string literals
pub fn concat_chain_function(name: &str, terms: usize) -> String {
    let parts: Vec<String> = (0..terms).map(|i| format!("'s{}'", i)).collect();
    format!("export function {}() {{\n    return {};\n}}\n", name, parts.join(" + "))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
