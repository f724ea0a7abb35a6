// src/config/mod.rs

//! Configuration loading and validation for curl-runner.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and defaults (`model.rs`).
//! - Load the optional `curl-runner.toml` from disk (`loader.rs`).
//! - Validate basic invariants like non-zero batch sizes (`validate.rs`).
//!
//! The CLI layers its own overrides on top via
//! [`RunnerConfig::with_overrides`]; precedence is CLI > file > defaults.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{RawConfigFile, RunnerConfig};
pub use validate::validate_config;
