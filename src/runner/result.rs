// src/runner/result.rs

//! Per-script outcomes and their aggregation.

use std::time::Duration;

/// Outcome of one script execution.
///
/// A sum type rather than a success flag with optional fields: a
/// failure always carries an error message, a success never does, and
/// there is no representable in-between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success {
        script_name: String,
        /// Captured stdout of the script.
        output: String,
        /// Status parsed from the output marker, when present.
        http_status: Option<u16>,
        duration: Duration,
    },
    Failure {
        script_name: String,
        /// Missing file, spawn/exit description, stderr, or the
        /// synthesized API error message.
        error: String,
        http_status: Option<u16>,
        /// Zero for scripts that never spawned.
        duration: Duration,
    },
}

impl ExecutionResult {
    pub fn script_name(&self) -> &str {
        match self {
            Self::Success { script_name, .. } | Self::Failure { script_name, .. } => script_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Success { http_status, .. } | Self::Failure { http_status, .. } => *http_status,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Self::Success { duration, .. } | Self::Failure { duration, .. } => *duration,
        }
    }

    /// Error message; `None` for successes.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Captured stdout; `None` for failures.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success { output, .. } => Some(output),
            Self::Failure { .. } => None,
        }
    }
}

/// Aggregate counts and timing over one run.
///
/// `total_duration` is the sum of per-script durations, which under a
/// parallel plan exceeds the wall-clock time of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration: Duration,
}

/// Pure fold over results; an empty slice is the all-zero summary.
pub fn summarize(results: &[ExecutionResult]) -> BatchSummary {
    results
        .iter()
        .fold(BatchSummary::default(), |mut acc, result| {
            acc.total += 1;
            if result.is_success() {
                acc.succeeded += 1;
            } else {
                acc.failed += 1;
            }
            acc.total_duration += result.duration();
            acc
        })
}
