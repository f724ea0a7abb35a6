// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a `curl-runner.toml` file.
///
/// Every key is optional and falls back to the built-in defaults, so an
/// empty (or absent) file is a valid configuration:
///
/// ```toml
/// scripts_dir = "./cURL_scripts"
/// logs_dir = "./var/logs"
/// script_delay_ms = 100
/// batch_size = 5
/// batch_delay_ms = 200
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Directory scanned for `*.sh` scripts.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,

    /// Directory the run/report/error log files are written to.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,

    /// Sleep between consecutive scripts in a sequential run (ms).
    #[serde(default = "default_script_delay_ms")]
    pub script_delay_ms: u64,

    /// Chunk size for the fixed-batch plan.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Sleep between batches in the fixed-batch plan (ms).
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

fn default_scripts_dir() -> String {
    "./cURL_scripts".to_string()
}

fn default_logs_dir() -> String {
    "./var/logs".to_string()
}

fn default_script_delay_ms() -> u64 {
    100
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_delay_ms() -> u64 {
    200
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            logs_dir: default_logs_dir(),
            script_delay_ms: default_script_delay_ms(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

/// Validated runner configuration.
///
/// This is the form the rest of the application consumes. It is produced
/// from [`RawConfigFile`] via `TryFrom` (see `validate.rs`) and then
/// adjusted with CLI overrides; nothing downstream reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub scripts_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub script_delay_ms: u64,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
}

impl RunnerConfig {
    /// Construct without re-validating. Only `validate.rs` should call this.
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            scripts_dir: PathBuf::from(raw.scripts_dir),
            logs_dir: PathBuf::from(raw.logs_dir),
            script_delay_ms: raw.script_delay_ms,
            batch_size: raw.batch_size,
            batch_delay_ms: raw.batch_delay_ms,
        }
    }

    /// Apply CLI-level overrides on top of the loaded values.
    ///
    /// Precedence is: CLI flag > config file > built-in default.
    pub fn with_overrides(mut self, dir: Option<PathBuf>, logs: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.scripts_dir = dir;
        }
        if let Some(logs) = logs {
            self.logs_dir = logs;
        }
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}
