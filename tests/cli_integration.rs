//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("clusterview")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("clusterview")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("clusterview")
        .unwrap()
        .arg("bogus")
        .assert()
        .failure();
}

#[test]
fn test_config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clusterview.toml");

    Command::cargo_bin("clusterview")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[server]"));
    assert!(content.contains("[containers]"));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("clusterview")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clusterview"));
}
