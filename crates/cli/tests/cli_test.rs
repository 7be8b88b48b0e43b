//! Integration tests for the `tfgate` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process;
use tempfile::TempDir;

const BACKEND: &str = "terraform {\n  backend \"gcs\" {\n    bucket = \"state\"\n  }\n}\n";

fn tfgate(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tfgate").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn repository() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let uses_a = format!("{BACKEND}module \"a\" {{\n  source = \"../modules/a\"\n}}\n");
    write(root, "project1/main.tf", &uses_a);
    write(root, "project2/main.tf", &uses_a);
    write(root, "project3/main.tf", BACKEND);
    write(root, "modules/a/main.tf", "variable \"x\" {}\n");
    temp_dir
}

#[test]
fn test_entrypoints_text() {
    let repo = repository();

    tfgate(repo.path())
        .arg("entrypoints")
        .assert()
        .success()
        .stdout("project1\nproject2\nproject3\n");
}

#[test]
fn test_entrypoints_json() {
    let repo = repository();

    tfgate(repo.path())
        .args(["entrypoints", "--format", "json"])
        .assert()
        .success()
        .stdout("[\"project1\",\"project2\",\"project3\"]\n");
}

#[test]
fn test_entrypoints_alias_and_dir() {
    let repo = repository();

    tfgate(repo.path())
        .args(["e", "-d", "project2"])
        .assert()
        .success()
        .stdout("project2\n");
}

#[test]
fn test_invalid_format() {
    let repo = repository();

    tfgate(repo.path())
        .args(["entrypoints", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("supported formats are: json, text"));
}

#[test]
fn test_missing_directory_fails() {
    let repo = repository();

    tfgate(repo.path())
        .args(["entrypoints", "--dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_detect_changes_requires_refs() {
    let repo = repository();

    tfgate(repo.path())
        .args(["entrypoints", "--detect-changes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--source-ref"));
}

#[test]
fn test_config_file_sets_format() {
    let repo = repository();
    write(repo.path(), ".tfgate.json", "{\n  \"format\": \"json\"\n}\n");

    tfgate(repo.path())
        .arg("entrypoints")
        .assert()
        .success()
        .stdout("[\"project1\",\"project2\",\"project3\"]\n");

    // Flags take precedence over the file
    tfgate(repo.path())
        .args(["entrypoints", "-f", "text"])
        .assert()
        .success()
        .stdout("project1\nproject2\nproject3\n");
}

#[test]
fn test_modules_text() {
    let repo = repository();

    tfgate(repo.path())
        .arg("modules")
        .assert()
        .success()
        .stdout("project1\n  modules/a\nproject2\n  modules/a\nproject3\n");
}

#[test]
fn test_unresolvable_module_flag() {
    let repo = repository();
    write(
        repo.path(),
        "project4/main.tf",
        &format!("{BACKEND}module \"gone\" {{\n  source = \"../modules/gone\"\n}}\n"),
    );

    tfgate(repo.path())
        .args(["modules", "--fail-unresolvable-modules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("../modules/gone"));

    tfgate(repo.path()).arg("modules").assert().success();
}

fn git(dir: &Path, args: &[&str]) -> bool {
    process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_detect_changes_with_git() {
    let repo = repository();
    let root = repo.path();

    let setup = [
        &["init", "-q"][..],
        &["config", "user.email", "ci@example.com"],
        &["config", "user.name", "CI"],
        &["config", "commit.gpgsign", "false"],
        &["add", "."],
        &["commit", "-q", "-m", "initial"],
    ];
    if !setup.iter().all(|args| git(root, args)) {
        eprintln!("git is not available, skipping");
        return;
    }

    write(root, "modules/a/main.tf", "variable \"x\" {}\nvariable \"y\" {}\n");
    assert!(git(root, &["commit", "-q", "-am", "change module a"]));

    tfgate(root)
        .args([
            "entrypoints",
            "--detect-changes",
            "--source-ref",
            "HEAD~1",
            "--dest-ref",
            "HEAD",
        ])
        .assert()
        .success()
        .stdout("project1\nproject2\n");
}
