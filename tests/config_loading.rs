// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use curl_runner::config::{default_config_path, load_and_validate, load_or_default, RunnerConfig};
use curl_runner::errors::RunnerError;

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = load_or_default("definitely-not-here.toml").unwrap();

    assert_eq!(config, RunnerConfig::default());
    assert_eq!(config.scripts_dir, PathBuf::from("./cURL_scripts"));
    assert_eq!(config.logs_dir, PathBuf::from("./var/logs"));
    assert_eq!(config.script_delay_ms, 100);
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.batch_delay_ms, 200);
}

#[test]
fn full_file_overrides_every_default() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
scripts_dir = "./api-checks"
logs_dir = "./out/logs"
script_delay_ms = 250
batch_size = 10
batch_delay_ms = 500
"#
    )
    .unwrap();

    let config = load_and_validate(file.path()).unwrap();

    assert_eq!(config.scripts_dir, PathBuf::from("./api-checks"));
    assert_eq!(config.logs_dir, PathBuf::from("./out/logs"));
    assert_eq!(config.script_delay_ms, 250);
    assert_eq!(config.batch_size, 10);
    assert_eq!(config.batch_delay_ms, 500);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "batch_size = 2\n").unwrap();

    let config = load_and_validate(file.path()).unwrap();

    assert_eq!(config.batch_size, 2);
    assert_eq!(config.scripts_dir, PathBuf::from("./cURL_scripts"));
    assert_eq!(config.script_delay_ms, 100);
}

#[test]
fn zero_batch_size_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "batch_size = 0\n").unwrap();

    let result = load_and_validate(file.path());

    match result {
        Err(RunnerError::ConfigError(msg)) => {
            assert!(msg.contains("batch_size"));
            assert!(msg.contains(">= 1"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn blank_scripts_dir_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "scripts_dir = \"  \"\n").unwrap();

    let result = load_and_validate(file.path());

    match result {
        Err(RunnerError::ConfigError(msg)) => {
            assert!(msg.contains("scripts_dir"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "batch_size = \"lots\"\n").unwrap();

    let result = load_and_validate(file.path());

    assert!(matches!(result, Err(RunnerError::TomlError(_))));
}

#[test]
fn broken_existing_file_is_not_silently_defaulted() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "batch_size = 0\n").unwrap();

    // load_or_default only tolerates a *missing* file.
    assert!(load_or_default(file.path()).is_err());
}

#[test]
fn cli_overrides_beat_the_file_values() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "scripts_dir = \"./from-file\"\n").unwrap();

    let config = load_and_validate(file.path())
        .unwrap()
        .with_overrides(Some(PathBuf::from("./from-cli")), None);

    assert_eq!(config.scripts_dir, PathBuf::from("./from-cli"));
    // Untouched fields keep their loaded values.
    assert_eq!(config.logs_dir, PathBuf::from("./var/logs"));
}

#[test]
fn default_config_path_is_project_local() {
    assert_eq!(default_config_path(), PathBuf::from("curl-runner.toml"));
}
