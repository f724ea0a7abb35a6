// src/runner/engine.rs

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::errors::Result;
use crate::exec::{ScriptExecutor, classify, extract_http_status};
use crate::fs::FileSystem;
use crate::logbook::{Logbook, RunLog};
use crate::runner::plan::ConcurrencyPlan;
use crate::runner::result::{ExecutionResult, summarize};
use crate::scripts::{Script, normalize_script_name};

/// Drives a list of scripts through a [`ConcurrencyPlan`] and collects
/// one [`ExecutionResult`] per script, in input order.
///
/// The runner never short-circuits: a failing script cannot prevent its
/// siblings from running, and every per-script problem ends up as a
/// `Failure` value rather than an `Err`. The only fallible part of
/// [`Runner::run`] is plan validation, which fails before anything is
/// spawned.
///
/// Generic over the executor so tests can substitute a fake that
/// returns canned output instead of spawning `bash`.
pub struct Runner<E> {
    config: RunnerConfig,
    fs: Arc<dyn FileSystem>,
    logbook: Logbook,
    executor: E,
}

impl<E> fmt::Debug for Runner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<E: ScriptExecutor> Runner<E> {
    pub fn new(config: RunnerConfig, fs: Arc<dyn FileSystem>, executor: E) -> Self {
        let logbook = Logbook::new(fs.clone(), &config.logs_dir);
        Self {
            config,
            fs,
            logbook,
            executor,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// Execute every script under the given plan.
    ///
    /// Returns one result per input script, position-matched to the
    /// input regardless of completion order. An empty list completes
    /// immediately without opening a log file.
    pub async fn run(
        &self,
        scripts: &[Script],
        plan: ConcurrencyPlan,
    ) -> Result<Vec<ExecutionResult>> {
        plan.validate()?;

        if scripts.is_empty() {
            info!("no scripts to run");
            return Ok(Vec::new());
        }

        let log = self.logbook.open_run_log(None);
        let names: Vec<&str> = scripts.iter().map(|s| s.name.as_str()).collect();
        info!(
            count = scripts.len(),
            mode = plan.mode(),
            log_file = %log.file_name(),
            "starting run"
        );

        log.append(&plan.preamble(scripts.len()));
        log.append(&format!("Scripts to run: {}", names.join(", ")));
        self.logbook.report(&plan.report_start(scripts.len()));

        let started = Instant::now();
        let results = match plan {
            ConcurrencyPlan::Sequential { delay } => {
                self.run_sequential(scripts, delay, &log).await
            }
            ConcurrencyPlan::Unlimited => self.run_unlimited(scripts, &log).await,
            ConcurrencyPlan::FixedBatch { batch_size, delay } => {
                self.run_chunked(scripts, batch_size, delay, &log).await
            }
            ConcurrencyPlan::Bounded { max_concurrent } => {
                self.run_chunked(scripts, max_concurrent, Duration::ZERO, &log)
                    .await
            }
        };
        let elapsed_ms = started.elapsed().as_millis();

        let summary = summarize(&results);
        log.append(&plan.run_log_summary(&summary, elapsed_ms));
        self.logbook.report(&plan.report_complete(&summary, elapsed_ms));
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            total = summary.total,
            elapsed_ms = elapsed_ms as u64,
            "run complete"
        );

        Ok(results)
    }

    /// Run one script by name, with the run log named after it.
    ///
    /// The name gains a `.sh` suffix if missing; a file that does not
    /// exist yields the not-found `Failure`, not an error.
    pub async fn run_single(&self, name: &str) -> Result<ExecutionResult> {
        let name = normalize_script_name(name);
        let script = Script::new(name, &self.config.scripts_dir);

        let log = self.logbook.open_run_log(Some(&script.name));
        info!(script = %script.name, log_file = %log.file_name(), "running single script");
        self.logbook
            .report(&format!("SINGLE SCRIPT: Starting {}", script.name));

        Ok(self.run_script(&script, &log).await)
    }

    async fn run_sequential(
        &self,
        scripts: &[Script],
        delay: Duration,
        log: &RunLog,
    ) -> Vec<ExecutionResult> {
        let mut results = Vec::with_capacity(scripts.len());
        for (index, script) in scripts.iter().enumerate() {
            results.push(self.run_script(script, log).await);
            if index + 1 < scripts.len() && !delay.is_zero() {
                sleep(delay).await;
            }
        }
        results
    }

    async fn run_unlimited(&self, scripts: &[Script], log: &RunLog) -> Vec<ExecutionResult> {
        // join_all preserves input order in its output, which is what
        // keeps results position-matched under concurrency.
        join_all(scripts.iter().map(|script| self.run_script(script, log))).await
    }

    async fn run_chunked(
        &self,
        scripts: &[Script],
        chunk_size: usize,
        delay: Duration,
        log: &RunLog,
    ) -> Vec<ExecutionResult> {
        let total_chunks = scripts.len().div_ceil(chunk_size);
        let mut results = Vec::with_capacity(scripts.len());

        for (index, chunk) in scripts.chunks(chunk_size).enumerate() {
            let number = index + 1;
            let names: Vec<&str> = chunk.iter().map(|s| s.name.as_str()).collect();
            debug!(batch = number, total_batches = total_chunks, "starting batch");
            log.append(&format!(
                "Starting batch {}/{} with scripts: {}",
                number,
                total_chunks,
                names.join(", ")
            ));

            let chunk_started = Instant::now();
            let chunk_results =
                join_all(chunk.iter().map(|script| self.run_script(script, log))).await;
            let chunk_summary = summarize(&chunk_results);
            log.append(&format!(
                "Batch {} completed: {} successful, {} failed in {}ms",
                number,
                chunk_summary.succeeded,
                chunk_summary.failed,
                chunk_started.elapsed().as_millis()
            ));
            results.extend(chunk_results);

            if number < total_chunks && !delay.is_zero() {
                debug!(delay_ms = delay.as_millis() as u64, "sleeping between batches");
                sleep(delay).await;
            }
        }
        results
    }

    /// Execute one script and classify the outcome. Infallible: every
    /// path, including a missing file and a spawn error, produces a
    /// result value.
    async fn run_script(&self, script: &Script, log: &RunLog) -> ExecutionResult {
        if !self.fs.is_file(&script.path) {
            let error = format!(
                "Script {} not found in {}",
                script.name,
                self.config.scripts_dir.display()
            );
            warn!(script = %script.name, "script file missing");
            log.append(&format!("ERROR: {}", error));
            return ExecutionResult::Failure {
                script_name: script.name.clone(),
                error,
                http_status: None,
                duration: Duration::ZERO,
            };
        }

        log.append(&format!("Starting execution of script: {}", script.name));

        let output = self.executor.run_script(script).await;
        let duration_ms = output.duration.as_millis() as u64;
        let verdict = classify(&output.stdout, &output.stderr);

        if !output.exited_cleanly() {
            let description = output.failure_description();
            // stderr (via the verdict) is the most useful message when
            // present; otherwise fall back to the exit description.
            let error = verdict
                .error_message
                .unwrap_or_else(|| format!("Error executing {}: {}", script.name, description));
            // The marker may be missing from a failed run's stdout, so
            // cast the wider net over everything that was captured.
            let http_status = verdict.http_status.or_else(|| {
                extract_http_status(&output.stdout).or_else(|| extract_http_status(&output.stderr))
            });

            warn!(script = %script.name, error = %description, "script failed");
            log.append(&format!(
                "ERROR: Error executing {}: {}",
                script.name, description
            ));
            if !output.stderr.is_empty() {
                log.append(&format!("STDERR: {}", output.stderr));
            }
            self.logbook.report(&format!(
                "FAILED: {} ({}ms) - {}",
                script.name, duration_ms, description
            ));
            self.logbook
                .api_error(&script.name, &error, http_status, Some(duration_ms));

            return ExecutionResult::Failure {
                script_name: script.name.clone(),
                error,
                http_status,
                duration: output.duration,
            };
        }

        if verdict.is_api_error {
            // classify() always fills these for an API error.
            let status = verdict.http_status.unwrap_or_default();
            let error = verdict
                .error_message
                .unwrap_or_else(|| format!("HTTP {} error", status));

            warn!(script = %script.name, http_status = status, "API error");
            log.append(&format!("API ERROR: HTTP {}", status));
            self.logbook.report(&format!(
                "API ERROR: {} ({}ms) - HTTP {}",
                script.name, duration_ms, status
            ));
            self.logbook
                .api_error(&script.name, &error, Some(status), Some(duration_ms));

            return ExecutionResult::Failure {
                script_name: script.name.clone(),
                error,
                http_status: verdict.http_status,
                duration: output.duration,
            };
        }

        info!(script = %script.name, duration_ms, "script succeeded");
        log.append(&format!(
            "SUCCESS: {} completed successfully in {}ms",
            script.name, duration_ms
        ));
        if !output.stdout.is_empty() {
            log.append(&format!("OUTPUT: {}", output.stdout.trim()));
        }
        self.logbook
            .report(&format!("SUCCESS: {} ({}ms)", script.name, duration_ms));

        ExecutionResult::Success {
            script_name: script.name.clone(),
            output: output.stdout,
            http_status: verdict.http_status,
            duration: output.duration,
        }
    }
}
