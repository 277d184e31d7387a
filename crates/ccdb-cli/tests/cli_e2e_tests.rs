//! End-to-end tests for the ccdb binary.
//!
//! Each test runs the compiled binary against a temporary project with
//! `CCDB_CONFIG_DIR` pointing at an empty directory, so the user's global
//! settings never leak in.

use assert_cmd::Command;
use ccdb_test_utils::TestProject;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A `ccdb` command isolated from the user's config and colour settings.
fn ccdb_cmd(global: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ccdb"));
    cmd.env("CCDB_CONFIG_DIR", global.path()).env("NO_COLOR", "1");
    cmd
}

fn dev_project() -> TestProject {
    let project = TestProject::new();
    project.write_presets(&[
        ("base", json!({"hidden": true, "binaryDir": "${sourceDir}/out/${presetName}"})),
        ("dev", json!({"inherits": "base"})),
        ("release", json!({"inherits": "base", "binaryDir": "${sourceDir}/rel"})),
    ]);
    project
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_output() {
    let global = TempDir::new().unwrap();
    ccdb_cmd(&global)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn test_version_output() {
    let global = TempDir::new().unwrap();
    ccdb_cmd(&global)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ccdb"));
}

#[test]
fn test_no_command_prints_hint() {
    let global = TempDir::new().unwrap();
    ccdb_cmd(&global)
        .assert()
        .success()
        .stdout(predicate::str::contains("ccdb --help"));
}

#[test]
fn test_completions_for_bash() {
    let global = TempDir::new().unwrap();
    ccdb_cmd(&global)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ccdb"));
}

// ============================================================================
// configure
// ============================================================================

#[test]
fn test_configure_dry_run_prints_command_only() {
    let project = dev_project();
    let global = TempDir::new().unwrap();
    let root = project.canonical_root();

    ccdb_cmd(&global)
        .current_dir(project.mkdir("src"))
        .args(["configure", "--preset", "dev", "--dry-run", "--", "-GNinja"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "cmake -S {} -B {}/out/dev/ -DCMAKE_EXPORT_COMPILE_COMMANDS=TRUE -GNinja",
            root, root
        )));

    project.assert_file_not_exists(".clangd");
}

#[cfg(unix)]
#[test]
fn test_configure_writes_clangd() {
    let project = dev_project();
    project.write(".ccdb.toml", "cmake_program = \"true\"\n");
    project.write_clangd("Index:\n  Background: Skip\n");
    let global = TempDir::new().unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["configure", "-p", "release"])
        .assert()
        .success();

    assert_eq!(
        project.read(".clangd"),
        format!(
            "Index:\n  Background: Skip\nCompileFlags:\n    CompilationDatabase: {}/rel/\n",
            project.canonical_root()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_configure_reports_build_tool_failure() {
    let project = dev_project();
    project.write(".ccdb.toml", "cmake_program = \"false\"\n");
    let global = TempDir::new().unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["configure", "-p", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("false exited with status 1"));

    project.assert_file_not_exists(".clangd");
}

#[test]
fn test_configure_unknown_preset_fails() {
    let project = dev_project();
    let global = TempDir::new().unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["configure", "-p", "nightly", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset not found: nightly"));
}

#[test]
fn test_configure_outside_project_names_marker() {
    let outside = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    std::fs::write(
        global.path().join("config.toml"),
        "project_marker = \"ccdb-e2e-project.marker\"\n",
    )
    .unwrap();

    ccdb_cmd(&global)
        .current_dir(outside.path())
        .args(["configure", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ccdb-e2e-project.marker"));
}

#[test]
fn test_configure_preset_conflicts_with_no_preset() {
    let project = dev_project();
    let global = TempDir::new().unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["configure", "-p", "dev", "--no-preset"])
        .assert()
        .failure();
}

// ============================================================================
// show and presets
// ============================================================================

#[test]
fn test_show_json() {
    let project = TestProject::new();
    project.write_clangd("CompileFlags:\n  CompilationDatabase: '/a #b' # quoted\n");
    let global = TempDir::new().unwrap();

    let output = ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["compilation_database"], "/a #b");
    assert_eq!(
        report["path"],
        format!("{}/.clangd", project.canonical_root())
    );
}

#[test]
fn test_show_plain() {
    let project = TestProject::new();
    project.write_clangd("CompileFlags:\n  CompilationDatabase: build\n");
    let global = TempDir::new().unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("CompilationDatabase: build"));
}

#[test]
fn test_presets_json_lists_visible_only() {
    let project = dev_project();
    let global = TempDir::new().unwrap();
    let root = project.canonical_root();

    let output = ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["presets", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        json!([
            {"name": "dev", "binary_dir": format!("{}/out/dev/", root)},
            {"name": "release", "binary_dir": format!("{}/rel/", root)},
        ])
    );
}

#[test]
fn test_global_config_dir_is_honoured() {
    let project = TestProject::new();
    project.write("build.marker", "");
    let global = TempDir::new().unwrap();
    std::fs::write(
        global.path().join("config.toml"),
        "project_marker = \"build.marker\"\ndefault_build_dir = \"cmake-out\"\n",
    )
    .unwrap();

    ccdb_cmd(&global)
        .current_dir(project.root())
        .args(["configure", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "-B {}/cmake-out/",
            project.canonical_root()
        )));
}
