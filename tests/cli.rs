use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studybreak(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studybreak").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("STUDYBREAK_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_durations_lists_defaults() {
    let home = TempDir::new().unwrap();
    studybreak(&home)
        .arg("durations")
        .assert()
        .success()
        .stdout(predicate::str::contains("25 min"))
        .stdout(predicate::str::contains("45 min"))
        .stdout(predicate::str::contains("60 min"));
}

#[test]
fn test_config_init_writes_under_home() {
    let home = TempDir::new().unwrap();
    studybreak(&home)
        .args(["config", "init"])
        .assert()
        .success();

    assert!(home.path().join(".studybreak").join("config.yaml").exists());

    studybreak(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_validate_accepts_custom_table() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.yaml");
    std::fs::write(
        &path,
        "timer:\n  default_study_minutes: 50\n  break_minutes: {50: 10}\n  appreciation_intervals: {50: 2}\n",
    )
    .unwrap();

    studybreak(&home)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("default 50 min"));
}

#[test]
fn test_config_validate_rejects_orphan_interval() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.yaml");
    std::fs::write(
        &path,
        "timer:\n  break_minutes: {25: 5}\n  appreciation_intervals: {25: 3, 90: 1}\n",
    )
    .unwrap();

    studybreak(&home)
        .args(["config", "validate"])
        .env("STUDYBREAK_CONFIG", &path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_validate_rejects_oversized_duration() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("huge.yaml");
    std::fs::write(
        &path,
        "timer:\n  default_study_minutes: 80000000\n  break_minutes: {80000000: 5}\n  appreciation_intervals: {80000000: 1}\n",
    )
    .unwrap();

    studybreak(&home)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("at most 1440 minutes"));

    studybreak(&home)
        .args(["simulate", "--cycles", "1", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_help_does_not_create_log_file() {
    let home = TempDir::new().unwrap();
    studybreak(&home).arg("--help").assert().success();
    studybreak(&home)
        .args(["completions", "zsh"])
        .assert()
        .success();

    assert!(!home.path().join(".studybreak").exists());
}

#[test]
fn test_simulate_json() {
    let home = TempDir::new().unwrap();
    let output = studybreak(&home)
        .args(["simulate", "-o", "json", "--cycles", "1", "--minutes", "45"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["study_minutes"], 45);
    assert_eq!(report["break_minutes"], 10);
    assert_eq!(report["total_seconds"], 55 * 60);
}

#[test]
fn test_simulate_unknown_duration_fails() {
    let home = TempDir::new().unwrap();
    studybreak(&home)
        .args(["simulate", "--minutes", "7"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    studybreak(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studybreak"));
}
