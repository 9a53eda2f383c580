//! Integration tests for the bucketio binary

use assert_cmd::Command;
use bucketio::Config;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bucketio_with_config(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bucketio").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .env_remove("RUST_LOG");
    cmd
}

/// Run against `config.toml` in `config_dir`, writing the default one if absent
fn bucketio(config_dir: &TempDir) -> Command {
    let config_path = config_dir.path().join("config.toml");
    if !config_path.exists() {
        fs::write(&config_path, Config::default_config_content()).unwrap();
    }
    bucketio_with_config(&config_path)
}

#[test]
fn test_put_to_memory_store() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bin");
    fs::write(&input, b"Test data").unwrap();

    bucketio(&temp_dir)
        .args(["put", "memory://bucket/key", "--file"])
        .arg(&input)
        .assert()
        .success()
        .code(0);
}

#[test]
fn test_put_from_stdin() {
    let temp_dir = TempDir::new().unwrap();

    bucketio(&temp_dir)
        .args(["put", "memory://bucket/key"])
        .write_stdin("streamed bytes")
        .assert()
        .success();
}

#[test]
fn test_get_missing_object_fails() {
    let temp_dir = TempDir::new().unwrap();

    bucketio(&temp_dir)
        .args(["get", "memory://bucket/missing"])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read memory://bucket/missing"));
}

#[test]
fn test_invalid_url_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    bucketio(&temp_dir)
        .args(["get", "http://example.com/file"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not an object URL"));

    bucketio(&temp_dir)
        .args(["get", "s3://bucket-only"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Missing object key"));
}

#[test]
fn test_put_missing_file_exit_code() {
    let temp_dir = TempDir::new().unwrap();

    bucketio(&temp_dir)
        .args(["put", "memory://bucket/key", "--file", "/non/existent/file"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_config_init_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    bucketio_with_config(&config_path)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    bucketio_with_config(&config_path)
        .args(["config", "--init"])
        .assert()
        .success();
    assert!(config_path.exists());

    bucketio_with_config(&config_path)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provider = \"s3\""));

    bucketio_with_config(&config_path)
        .args(["config", "--init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_missing_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("typo.toml");

    bucketio_with_config(&config_path)
        .args(["get", "memory://bucket/key"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to load configuration"));

    bucketio_with_config(&config_path)
        .args(["config", "--show"])
        .assert()
        .failure()
        .code(2);
    assert!(!config_path.exists());
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[client]\nprovider = \"ftp\"\n",
    )
    .unwrap();

    bucketio(&temp_dir)
        .args(["config", "--show"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"));
}
