use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn chronicle(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chronicle").unwrap();
    cmd.current_dir(cwd)
        .env_remove("DEBUG")
        .env_remove("CHRONICLE_LOG_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn log_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn write_appends_and_echoes_entry() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");

    chronicle(dir.path())
        .args(["write", "app", "hello world", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[INFO] :] hello world"));

    let files = log_files(&log_dir);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("app-") && files[0].ends_with(".log"));

    let content = fs::read_to_string(log_dir.join(&files[0])).unwrap();
    assert!(content.ends_with(":] hello world\n"));
}

#[test]
fn error_level_goes_to_stderr() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["write", "app", "disk full", "--level", "error", "--component", "store"])
        .arg("--log-dir")
        .arg(dir.path().join("log"))
        .assert()
        .success()
        .stderr(predicate::str::contains("[ERROR] @store :] disk full"))
        .stdout(predicate::str::contains("disk full").not());
}

#[test]
fn unknown_level_is_rejected() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["write", "app", "msg", "--level", "loud"])
        .assert()
        .failure();
}

#[test]
fn interpreted_flag_kebab_cases_the_name() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");

    chronicle(dir.path())
        .args(["write", "MyApp", "hi", "--interpreted", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success();

    assert!(log_files(&log_dir)[0].starts_with("my-app-"));
}

#[test]
fn invalid_name_fails() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["write", "../escape", "hi", "--log-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn rotate_removes_expired_logs() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");
    fs::create_dir_all(&log_dir).unwrap();
    fs::write(log_dir.join("app-20000101.log"), "old\n").unwrap();
    fs::write(log_dir.join("unrelated.txt"), "keep\n").unwrap();

    chronicle(dir.path())
        .args(["rotate", "app", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 0, removed 1"));

    assert_eq!(log_files(&log_dir), vec!["unrelated.txt".to_string()]);
}

#[test]
fn rotate_archives_with_custom_thresholds() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");
    fs::create_dir_all(&log_dir).unwrap();
    fs::write(log_dir.join("app-20000101.log"), "old\n").unwrap();

    chronicle(dir.path())
        .args(["rotate", "app", "--archive-after-days", "1", "--remove-after-days", "100000"])
        .arg("--log-dir")
        .arg(&log_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 1, removed 0"));

    assert_eq!(log_files(&log_dir), vec!["app-20000101.tar.gz".to_string()]);
}

#[test]
fn rotate_empty_directory_is_a_no_op() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["rotate", "app", "--log-dir"])
        .arg(dir.path().join("log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to rotate"));
}

#[test]
fn inverted_thresholds_are_rejected() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["rotate", "app", "--archive-after-days", "10", "--remove-after-days", "5"])
        .arg("--log-dir")
        .arg(dir.path().join("log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("remove_after_days"));
}

#[test]
fn paths_reports_overrides() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs-here");
    let base_dir = dir.path().join("base-here");

    chronicle(dir.path())
        .args(["paths", "app", "--log-dir"])
        .arg(&log_dir)
        .arg("--base-dir")
        .arg(&base_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("logs-here"))
        .stdout(predicate::str::contains("base-here"));
}

#[test]
fn tail_shows_last_entries() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");

    for message in ["first entry", "second entry"] {
        chronicle(dir.path())
            .args(["write", "app", message, "--log-dir"])
            .arg(&log_dir)
            .assert()
            .success();
    }

    chronicle(dir.path())
        .args(["tail", "app", "-n", "1", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("second entry"))
        .stdout(predicate::str::contains("first entry").not());
}

#[test]
fn tail_without_entries() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .args(["tail", "app", "--log-dir"])
        .arg(dir.path().join("log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet"));
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("chronicle.toml"), "context = \"interpreted\"\n").unwrap();
    let log_dir = dir.path().join("log");

    chronicle(dir.path())
        .args(["write", "BillingService", "charged", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success();

    assert!(log_files(&log_dir)[0].starts_with("billing-service-"));
}

#[test]
fn explicit_config_with_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.yaml");
    fs::write(&config, "retention: 3\n").unwrap();

    chronicle(dir.path())
        .args(["write", "app", "hi", "--config"])
        .arg(&config)
        .arg("--log-dir")
        .arg(dir.path().join("log"))
        .assert()
        .failure();
}

#[test]
fn debug_env_show_writes_rotation_header() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("log");

    chronicle(dir.path())
        .env("DEBUG", "Show")
        .args(["write", "app", "hello", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Active log file:"));

    let files = log_files(&log_dir);
    let content = fs::read_to_string(log_dir.join(&files[0])).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().next().unwrap().contains(":] Active log file:"));
}

#[test]
fn debug_env_other_values_disable_header() {
    let dir = TempDir::new().unwrap();

    chronicle(dir.path())
        .env("DEBUG", "yes")
        .args(["write", "app", "hello", "--log-dir"])
        .arg(dir.path().join("log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Active log file:").not());
}
