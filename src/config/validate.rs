// src/config/validate.rs

use crate::config::model::{RawConfigFile, RunnerConfig};
use crate::errors::{Result, RunnerError};

impl TryFrom<RawConfigFile> for RunnerConfig {
    type Error = crate::errors::RunnerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(RunnerConfig::new_unchecked(raw))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_directories(cfg)?;
    ensure_batch_bounds(cfg)?;
    Ok(())
}

fn ensure_directories(cfg: &RawConfigFile) -> Result<()> {
    if cfg.scripts_dir.trim().is_empty() {
        return Err(RunnerError::ConfigError(
            "scripts_dir must not be empty".to_string(),
        ));
    }
    if cfg.logs_dir.trim().is_empty() {
        return Err(RunnerError::ConfigError(
            "logs_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_batch_bounds(cfg: &RawConfigFile) -> Result<()> {
    if cfg.batch_size == 0 {
        return Err(RunnerError::ConfigError(
            "batch_size must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
