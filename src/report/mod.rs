// src/report/mod.rs
//! Weekly reporting over historical run data.
//!
//! Takes per-week run outcomes ([`WeekData`]) and produces JSON report
//! documents:
//!
//! - per-script success/error rates with data gaps and alerts where
//!   rates breach the configured thresholds,
//! - recommendations derived from the worst breaches,
//! - a cross-week summary with totals and a success-rate trend.
//!
//! This is a library surface with no CLI command; callers assemble
//! [`WeekData`] from wherever their run history lives and drive
//! [`WeeklyReporter`] themselves.

pub mod analysis;
pub mod model;
pub mod reporter;

pub use analysis::{
    analyze_week, recommendations, success_rate_trend, ERROR_RATE_THRESHOLD,
    SUCCESS_RATE_THRESHOLD,
};
pub use model::{
    Alert, DataGap, Recommendation, ScriptWeek, Severity, SummaryReport, Trend, WeekAnalysis,
    WeekData, WeeklyReport, REPORT_VERSION,
};
pub use reporter::{
    weekly_report_filename_at, WeeklyReporter, DEFAULT_REPORTS_DIR, DEFAULT_WEEKS, MAX_WEEKS,
    MIN_WEEKS, SUMMARY_REPORT_FILE,
};
