// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logbook;
pub mod logging;
pub mod report;
pub mod runner;
pub mod scripts;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::loader::{default_config_path, load_or_default};
use crate::exec::{ProcessExecutor, ScriptExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::runner::{ConcurrencyPlan, Runner};
use crate::scripts::scan_scripts;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, then CLI overrides)
/// - the real filesystem and `bash` process executor
/// - the runner, under the concurrency plan the subcommand selects
///
/// Script failures are reported through the log files and the exit code
/// stays zero; only startup problems (bad config, unusable logs
/// directory, malformed CLI input) surface as errors.
pub async fn run(args: CliArgs) -> Result<()> {
    let config =
        load_or_default(default_config_path())?.with_overrides(args.dir.clone(), args.logs.clone());

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let runner = Runner::new(config, Arc::clone(&fs), ProcessExecutor::new());
    runner.logbook().ensure_logs_dir()?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let delay = Duration::from_millis(runner.config().script_delay_ms);
            run_plan(&runner, fs.as_ref(), ConcurrencyPlan::Sequential { delay }).await
        }
        Command::RunScript { name } => {
            let result = runner.run_single(&name).await?;
            match result.error() {
                None => info!(
                    script = result.script_name(),
                    duration_ms = result.duration().as_millis() as u64,
                    "script succeeded"
                ),
                Some(error) => warn!(script = result.script_name(), error, "script failed"),
            }
            Ok(())
        }
        Command::RunParallel => run_plan(&runner, fs.as_ref(), ConcurrencyPlan::Unlimited).await,
        Command::RunConcurrent { batch_size, delay } => {
            let cfg = runner.config();
            let plan = ConcurrencyPlan::FixedBatch {
                batch_size: batch_size.unwrap_or(cfg.batch_size),
                delay: Duration::from_millis(delay.unwrap_or(cfg.batch_delay_ms)),
            };
            run_plan(&runner, fs.as_ref(), plan).await
        }
        Command::RunConcurrency { max } => {
            let plan = ConcurrencyPlan::Bounded { max_concurrent: max };
            run_plan(&runner, fs.as_ref(), plan).await
        }
        Command::List => {
            list_scripts(fs.as_ref(), &runner.config().scripts_dir);
            Ok(())
        }
    }
}

/// Scan the scripts directory and run everything found under `plan`.
async fn run_plan<E: ScriptExecutor>(
    runner: &Runner<E>,
    fs: &dyn FileSystem,
    plan: ConcurrencyPlan,
) -> Result<()> {
    let dir = &runner.config().scripts_dir;
    let scripts = scan_scripts(fs, dir);
    if scripts.is_empty() {
        warn!(dir = %dir.display(), "no .sh scripts found, nothing to do");
        return Ok(());
    }

    // Per-script failures come back as results, not errors; the run
    // itself only fails on an invalid plan.
    runner.run(&scripts, plan).await?;
    Ok(())
}

/// `list` output: the scripts in the order they would execute.
fn list_scripts(fs: &dyn FileSystem, dir: &Path) {
    let scripts = scan_scripts(fs, dir);
    if scripts.is_empty() {
        println!("No scripts found in {}", dir.display());
        return;
    }

    println!("Available cURL scripts ({}):", scripts.len());
    for (index, script) in scripts.iter().enumerate() {
        println!("  {}. {}", index + 1, script.name);
    }
}
