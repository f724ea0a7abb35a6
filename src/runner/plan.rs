// src/runner/plan.rs

//! Concurrency plans: how a list of scripts is driven through the
//! executor.
//!
//! The four plans share one execution path in the engine; what differs
//! is chunking, inter-step delays, and the wording of their log and
//! report lines, all of which is concentrated here.

use std::time::Duration;

use crate::errors::{Result, RunnerError};
use crate::runner::result::BatchSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPlan {
    /// One script at a time, sleeping `delay` between consecutive
    /// scripts (never after the last).
    Sequential { delay: Duration },
    /// Every script starts at once and the results are joined.
    Unlimited,
    /// Consecutive chunks of `batch_size`, each chunk joined, sleeping
    /// `delay` between chunks (never after the last).
    FixedBatch { batch_size: usize, delay: Duration },
    /// At most `max_concurrent` scripts in flight; chunks with no delay.
    Bounded { max_concurrent: usize },
}

impl ConcurrencyPlan {
    /// Short mode name used in diagnostics and report lines.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Sequential { .. } => "BATCH",
            Self::Unlimited => "PARALLEL",
            Self::FixedBatch { .. } => "CONCURRENT",
            Self::Bounded { .. } => "CONCURRENCY",
        }
    }

    /// Chunk size for chunked plans; `None` for the others.
    pub fn chunk_size(&self) -> Option<usize> {
        match *self {
            Self::FixedBatch { batch_size, .. } => Some(batch_size),
            Self::Bounded { max_concurrent } => Some(max_concurrent),
            _ => None,
        }
    }

    /// Reject zero bounds before anything is spawned.
    ///
    /// This is the one usage error that fails the whole call; every
    /// per-script problem becomes a `Failure` result instead.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedBatch { batch_size: 0, .. } => Err(RunnerError::InvalidConcurrency(
                "batch size must be >= 1 (got 0)".to_string(),
            )),
            Self::Bounded { max_concurrent: 0 } => Err(RunnerError::InvalidConcurrency(
                "max concurrency must be >= 1 (got 0)".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// First line of the per-run log.
    pub(crate) fn preamble(&self, count: usize) -> String {
        match *self {
            Self::Sequential { .. } => {
                format!("Starting batch execution of {} scripts", count)
            }
            Self::Unlimited => {
                format!("Starting parallel execution of {} scripts", count)
            }
            Self::FixedBatch { batch_size, .. } => format!(
                "Starting concurrent execution of {} scripts in batches of {}",
                count, batch_size
            ),
            Self::Bounded { max_concurrent } => format!(
                "Starting concurrency-controlled execution of {} scripts (max {} concurrent)",
                count, max_concurrent
            ),
        }
    }

    /// START line for the rolling report log.
    pub(crate) fn report_start(&self, count: usize) -> String {
        match *self {
            Self::Sequential { .. } => format!("BATCH START: Running {} scripts", count),
            Self::Unlimited => format!("PARALLEL START: Running {} scripts", count),
            Self::FixedBatch { batch_size, .. } => format!(
                "CONCURRENT START: Running {} scripts in batches of {}",
                count, batch_size
            ),
            Self::Bounded { max_concurrent } => format!(
                "CONCURRENCY START: Running {} scripts (max {} concurrent)",
                count, max_concurrent
            ),
        }
    }

    /// Closing line of the per-run log. The sequential plan historically
    /// reports no wall-clock time; the parallel plans do.
    pub(crate) fn run_log_summary(&self, summary: &BatchSummary, elapsed_ms: u128) -> String {
        let counts = format!(
            "{} successful, {} failed, {} total",
            summary.succeeded, summary.failed, summary.total
        );
        match self {
            Self::Sequential { .. } => format!("Batch execution completed: {}", counts),
            Self::Unlimited => {
                format!("Parallel execution completed: {} in {}ms", counts, elapsed_ms)
            }
            Self::FixedBatch { .. } => {
                format!("Concurrent execution completed: {} in {}ms", counts, elapsed_ms)
            }
            Self::Bounded { .. } => format!(
                "Concurrency-controlled execution completed: {} in {}ms",
                counts, elapsed_ms
            ),
        }
    }

    /// COMPLETE line for the rolling report log.
    pub(crate) fn report_complete(&self, summary: &BatchSummary, elapsed_ms: u128) -> String {
        let ratio = format!(
            "{}/{} successful ({} failed)",
            summary.succeeded, summary.total, summary.failed
        );
        match *self {
            Self::Sequential { .. } => format!("BATCH COMPLETE: {}", ratio),
            Self::Unlimited => format!("PARALLEL COMPLETE: {} in {}ms", ratio, elapsed_ms),
            Self::FixedBatch { batch_size, .. } => format!(
                "CONCURRENT COMPLETE: {} in {}ms across {} batches",
                ratio,
                elapsed_ms,
                summary.total.div_ceil(batch_size)
            ),
            Self::Bounded { .. } => format!("CONCURRENCY COMPLETE: {} in {}ms", ratio, elapsed_ms),
        }
    }
}
