// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `curl-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "curl-runner",
    version,
    about = "Run a directory of curl scripts and log the outcomes.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory containing the `.sh` scripts.
    ///
    /// Default: `./cURL_scripts`, or `scripts_dir` from the config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Directory the log files are written to.
    ///
    /// Default: `./var/logs`, or `logs_dir` from the config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub logs: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CURL_RUNNER_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run all scripts one at a time with a delay between them.
    Run,

    /// Run a single script by name (`.sh` may be omitted).
    RunScript { name: String },

    /// Run all scripts at once with no concurrency limit.
    RunParallel,

    /// Run scripts in fixed-size batches with a delay between batches.
    RunConcurrent {
        /// Scripts per batch.
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,

        /// Pause between batches, in milliseconds.
        #[arg(long, value_name = "MS")]
        delay: Option<u64>,
    },

    /// Run all scripts with at most MAX in flight at any moment.
    RunConcurrency {
        #[arg(value_name = "MAX")]
        max: usize,
    },

    /// List the scripts that would run, in execution order.
    List,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
