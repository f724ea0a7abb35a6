// src/exec/mod.rs

//! Script execution layer.
//!
//! This module is responsible for actually running discovered scripts
//! with `tokio::process::Command` and for turning their captured output
//! into a structured verdict.
//!
//! - [`backend`] provides the `ScriptExecutor` trait and the concrete
//!   `ProcessExecutor` the runner uses in production; tests replace it
//!   with a fake implementation.
//! - [`output`] parses captured output: the `HTTP Status:` marker scan,
//!   the broader extraction patterns, and the error categories.

pub mod backend;
pub mod output;

pub use backend::{ExecOutput, ExecStatus, ProcessExecutor, ScriptExecutor};
pub use output::{ErrorCategory, OutputVerdict, classify, extract_http_status};
