// src/logbook.rs

//! Product log files, as opposed to the diagnostic tracing in
//! [`crate::logging`].
//!
//! Three sinks live in the logs directory:
//!
//! - a per-run log (`run_<timestamp>.log`, or `<script>_<timestamp>.log`
//!   for single-script runs) with begin/end lines and captured output,
//! - `curl-runner-report.log`, one line per script and per batch, the
//!   long-term record the weekly reporter digests,
//! - `curl-api-errors.log`, one block per API error.
//!
//! Every line is prefixed `[<RFC 3339 UTC, millisecond precision>]`.
//! Appends are non-fatal: on failure the logs directory is (re)created
//! and the append retried once; a second failure is reported through
//! `tracing` and the run continues.
//!
//! Concurrent scripts append to the shared run log as they finish, so
//! ordering between scripts is not guaranteed; only whole lines are,
//! since each entry is a single append.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::errors::Result;
use crate::exec::ErrorCategory;
use crate::fs::FileSystem;

/// Rolling one-line-per-event report log.
pub const REPORT_LOG_FILE: &str = "curl-runner-report.log";

/// Dedicated API error log.
pub const ERROR_LOG_FILE: &str = "curl-api-errors.log";

const ERROR_LOG_SEPARATOR: &str = "-----------------------------------------";

/// Handle on the logs directory; cheap to clone.
#[derive(Debug, Clone)]
pub struct Logbook {
    fs: Arc<dyn FileSystem>,
    logs_dir: PathBuf,
}

impl Logbook {
    pub fn new(fs: Arc<dyn FileSystem>, logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            logs_dir: logs_dir.into(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Create the logs directory up front.
    ///
    /// Unlike the per-append retries this is fatal: if the directory
    /// cannot be created at startup, no run output would survive at all.
    pub fn ensure_logs_dir(&self) -> Result<()> {
        self.fs.create_dir_all(&self.logs_dir)?;
        Ok(())
    }

    /// Open the per-run log for this invocation.
    ///
    /// `script_name` switches the filename from `run_<ts>.log` to
    /// `<script>_<ts>.log` for single-script runs.
    pub fn open_run_log(&self, script_name: Option<&str>) -> RunLog {
        let file_name = log_filename_at(Utc::now(), script_name);
        RunLog {
            path: self.logs_dir.join(&file_name),
            file_name,
            book: self.clone(),
        }
    }

    /// Append one line to the rolling report log.
    pub fn report(&self, entry: &str) {
        let path = self.logs_dir.join(REPORT_LOG_FILE);
        self.append_with_retry(&path, &stamp(entry));
    }

    /// Append one block to the API error log.
    ///
    /// `duration_ms` of zero is omitted, matching a run that never
    /// started the process.
    pub fn api_error(
        &self,
        script_name: &str,
        details: &str,
        http_status: Option<u16>,
        duration_ms: Option<u64>,
    ) {
        let mut heading = format!("API ERROR: {}", script_name);
        if let Some(status) = http_status {
            let category = ErrorCategory::from_status(status);
            heading.push_str(&format!(" (HTTP {} {})", status, category));
        }
        match duration_ms {
            Some(ms) if ms > 0 => heading.push_str(&format!(" ({}ms)", ms)),
            _ => {}
        }

        let mut block = stamp(&heading);
        block.push_str(&stamp(&format!("Error: {}", details)));
        block.push_str(&stamp(ERROR_LOG_SEPARATOR));

        let path = self.logs_dir.join(ERROR_LOG_FILE);
        self.append_with_retry(&path, &block);
    }

    fn append_with_retry(&self, path: &Path, text: &str) {
        if let Err(first) = self.fs.append(path, text.as_bytes()) {
            // One retry after (re)creating the logs directory; a second
            // failure is reported and swallowed so the run keeps going.
            let retried = self
                .fs
                .create_dir_all(&self.logs_dir)
                .and_then(|_| self.fs.append(path, text.as_bytes()));
            if let Err(err) = retried {
                warn!(
                    path = %path.display(),
                    first = %first,
                    error = %err,
                    "could not append to log file"
                );
            }
        }
    }
}

/// One run's log file. Shared by reference between concurrent scripts.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
    file_name: String,
    book: Logbook,
}

impl RunLog {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line; non-fatal like all sink writes.
    pub fn append(&self, entry: &str) {
        self.book.append_with_retry(&self.path, &stamp(entry));
    }
}

fn stamp(entry: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("[{}] {}\n", timestamp, entry)
}

/// Log filename for a run starting at `now`.
///
/// The timestamp is the ISO instant with `:` and `.` flattened to `-`,
/// truncated to seconds: `2026-08-24T12-34-56`. Script names lose their
/// `.sh` suffix and any character outside `[A-Za-z0-9-_]`.
pub fn log_filename_at(now: DateTime<Utc>, script_name: Option<&str>) -> String {
    let timestamp = now.format("%Y-%m-%dT%H-%M-%S");
    match script_name {
        Some(name) => {
            let stem = name.strip_suffix(".sh").unwrap_or(name);
            let clean: String = stem
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            format!("{}_{}.log", clean, timestamp)
        }
        None => format!("run_{}.log", timestamp),
    }
}
