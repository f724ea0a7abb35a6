// src/exec/backend.rs

//! Pluggable script executor abstraction.
//!
//! The runner talks to a `ScriptExecutor` instead of spawning processes
//! directly. This makes it easy to swap in a fake executor in tests while
//! keeping the production implementation here.
//!
//! - [`ProcessExecutor`] is the default implementation: it runs each
//!   script as `bash <path>` and captures its output.
//! - Tests can provide their own `ScriptExecutor` that returns canned
//!   [`ExecOutput`]s without touching the OS.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::scripts::Script;

/// How a script's process came to an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecStatus {
    /// The process ran to completion with this exit code. Signal deaths
    /// carry `-1`, matching the missing `ExitStatus::code()`.
    Exited(i32),
    /// The process could not be started at all.
    SpawnFailed(String),
}

/// Everything captured from one script execution.
///
/// This is a plain record, not a `Result`: spawn failures and non-zero
/// exits are data for the runner to classify, so one bad script can never
/// abort a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExecStatus,
    pub duration: Duration,
}

impl ExecOutput {
    /// True when the process ran and exited zero.
    pub fn exited_cleanly(&self) -> bool {
        matches!(self.status, ExecStatus::Exited(0))
    }

    /// Human-readable description of a failed execution.
    pub fn failure_description(&self) -> String {
        match &self.status {
            ExecStatus::Exited(code) => format!("process exited with code {}", code),
            ExecStatus::SpawnFailed(msg) => msg.clone(),
        }
    }
}

/// Trait abstracting how a single script is executed.
///
/// Production code uses [`ProcessExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ScriptExecutor: Send + Sync {
    /// Run one script to completion, capturing its output.
    ///
    /// Implementations never fail the call itself: spawn errors are
    /// reported through [`ExecOutput::status`].
    fn run_script<'a>(
        &'a self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>>;
}

/// Real executor used in production: `bash <path>` per script.
///
/// Output is captured wholesale rather than streamed; scripts here are
/// short-lived curl wrappers, not long-running services. `kill_on_drop`
/// keeps an aborted run from leaking children.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptExecutor for ProcessExecutor {
    fn run_script<'a>(
        &'a self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>> {
        Box::pin(async move {
            debug!(script = %script.name, path = %script.path.display(), "starting script process");
            let started = Instant::now();

            let result = Command::new("bash")
                .arg(&script.path)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output()
                .await;

            let duration = started.elapsed();
            match result {
                Ok(output) => {
                    let code = output.status.code().unwrap_or(-1);
                    debug!(script = %script.name, exit_code = code, "script process exited");
                    ExecOutput {
                        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                        status: ExecStatus::Exited(code),
                        duration,
                    }
                }
                Err(err) => {
                    warn!(script = %script.name, error = %err, "failed to spawn script process");
                    ExecOutput {
                        stdout: String::new(),
                        stderr: String::new(),
                        status: ExecStatus::SpawnFailed(format!("failed to spawn bash: {}", err)),
                        duration,
                    }
                }
            }
        })
    }
}
