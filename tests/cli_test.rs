use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rails_app")
}

fn lx() -> Command {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--root").arg(fixture_root());
    cmd
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("hover"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_requires_subcommand() {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.assert().failure();
}

#[test]
fn test_empty_key_fails() {
    lx().args(["lookup", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key cannot be empty"));
    lx().args(["hover", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key cannot be empty"));
}

#[test]
fn test_scan_count() {
    lx().args(["scan", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14 entries in 4 files"));
}

#[test]
fn test_scan_simple_lines() {
    lx().arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains(":en:user.name: 'Name'"))
        .stdout(predicate::str::contains(":de:invoice.labels.add_new: 'Neu hinzufügen'"))
        .stdout(predicate::str::contains("Stale copy").not());
}

#[test]
fn test_scan_recovers_malformed_file_with_warning() {
    lx().arg("scan")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to parse YAML file"))
        .stderr(predicate::str::contains("de.yml"));
}

#[test]
fn test_lookup_exact() {
    lx().args(["--simple", "lookup", "user.name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en.yml:3:en:user.name: 'Name'"))
        .stdout(predicate::str::contains("ko:user.name: '이름'"));
}

#[test]
fn test_lookup_dynamic_key() {
    lx().args(["--simple", "lookup", "user.greeting.#{type}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user.greeting."));
}

#[test]
fn test_lookup_missing_key_is_not_an_error() {
    lx().args(["lookup", "does.not.exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found for 'does.not.exist'"));
}

#[test]
fn test_hover_uses_language_priority() {
    let output = lx()
        .args(["--lang", "ko,en", "--simple", "hover", "user.name"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let languages: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split(':').nth(2))
        .collect();
    assert_eq!(languages, vec!["ko", "en", "de", "fr"]);
}

#[test]
fn test_hover_tree_output() {
    lx().args(["hover", "invoice.labels.add_new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(4 entries)"))
        .stdout(predicate::str::contains("└─> "));
}

#[test]
fn test_complete_json() {
    let output = lx()
        .args(["--json", "complete", "user.greeting.", "--limit", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let keys: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(keys, vec!["user.greeting.casual", "user.greeting.formal"]);
}

#[test]
fn test_definition_prefers_first_language() {
    lx().args(["--lang", "de", "--simple", "definition", "invoice.labels.add_new"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            fixture_root()
                .join("config/locales/de.yml:7")
                .display()
                .to_string(),
        ));
}

#[test]
fn test_lookup_json_entries() {
    let output = lx()
        .args(["--json", "lookup", "user.name", "--lang", "fr"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().any(|e| e["language"] == "fr" && e["value"] == "Nom"));
}

#[test]
fn test_settings_file_and_empty_workspace() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--root")
        .arg(dir.path())
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("No locale entries found"));

    fs::create_dir_all(dir.path().join("app/i18n")).unwrap();
    fs::write(dir.path().join("app/i18n/en.yml"), "title: Title\n").unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"localePaths": ["app/i18n"], "verbose": false}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--root")
        .arg(dir.path())
        .arg("--config")
        .arg(dir.path().join("settings.json"))
        .args(["scan", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries in 1 files"));
}

#[test]
fn test_fixture_settings_file_sets_priority() {
    let output = lx()
        .arg("--config")
        .arg(fixture_root().join("lx.json"))
        .args(["--simple", "hover", "invoice.labels.add_new"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.lines().next().unwrap();
    assert!(first.contains(":ko:invoice.labels.add_new: '새로 추가'"));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn test_invalid_settings_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), r#"{"verbose": "sometimes"}"#).unwrap();

    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--root")
        .arg(dir.path())
        .arg("--config")
        .arg(dir.path().join("settings.json"))
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings"));
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.arg("--root")
        .arg(dir.path().join("missing"))
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Locale path not found"));
}
