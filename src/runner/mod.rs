// src/runner/mod.rs

//! The concurrency engine.
//!
//! - [`plan`] defines the four execution disciplines and their
//!   validation.
//! - [`result`] holds the per-script outcome type and the summary fold.
//! - [`engine`] drives scripts through a plan, classifies outcomes, and
//!   feeds the log sinks.
//!
//! Invariants the engine upholds for every plan:
//!
//! - `results.len() == scripts.len()`
//! - `results[i]` belongs to `scripts[i]`
//! - a per-script failure never aborts the run

pub mod engine;
pub mod plan;
pub mod result;

pub use engine::Runner;
pub use plan::ConcurrencyPlan;
pub use result::{BatchSummary, ExecutionResult, summarize};
