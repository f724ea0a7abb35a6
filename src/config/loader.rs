// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawConfigFile, RunnerConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform
/// semantic validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` field defaults).
/// - Checks directory fields are non-empty and `batch_size >= 1`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RunnerConfig> {
    let raw_config = load_from_path(&path)?;
    let config = RunnerConfig::try_from(raw_config)?;
    Ok(config)
}

/// Load the optional project-local configuration.
///
/// A missing file is not an error: the built-in defaults apply silently.
/// A file that exists but fails to parse or validate is still an error,
/// so typos do not quietly fall back to defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<RunnerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using built-in defaults");
        return Ok(RunnerConfig::default());
    }
    load_and_validate(path)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `curl-runner.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `CURL_RUNNER_CONFIG`).
/// - Look for multiple default locations.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("curl-runner.toml")
}
