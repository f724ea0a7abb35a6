// src/report/model.rs
//! Data model for weekly reporting.
//!
//! Input is a [`WeekData`] record (one week of per-script run
//! outcomes); output documents serialize to camelCase JSON via
//! `serde_json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::runner::ExecutionResult;

/// Report format version stamped into every document.
pub const REPORT_VERSION: &str = "1.0.0";

/// One week of run data across all scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekData {
    /// Week number within the reporting span.
    pub week: u32,
    /// Per-script run outcomes for the week.
    pub scripts: Vec<ScriptWeek>,
}

/// Run outcomes for a single script over one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptWeek {
    pub name: String,
    /// Success flag per recorded run, oldest first.
    pub results: Vec<bool>,
}

impl ScriptWeek {
    /// Collects success flags from a batch of execution results.
    pub fn from_results(name: impl Into<String>, results: &[ExecutionResult]) -> Self {
        Self {
            name: name.into(),
            results: results.iter().map(ExecutionResult::is_success).collect(),
        }
    }
}

/// Severity tier attached to gaps, alerts and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

/// A script whose weekly success rate fell below the threshold.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGap {
    pub script: String,
    pub success_rate: f64,
    /// Fraction of expected data missing, `1.0 - success_rate`.
    pub missing_data: f64,
    pub severity: Severity,
}

/// Threshold breach raised during analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Alert {
    /// A single script's error rate exceeded the error-rate threshold.
    ErrorRate {
        script: String,
        error_rate: f64,
        threshold: f64,
        severity: Severity,
    },
    /// The overall success rate fell below the success-rate threshold.
    OverallPerformance {
        overall_success_rate: f64,
        threshold: f64,
        severity: Severity,
    },
}

/// Full analysis of one week of run data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAnalysis {
    pub week: u32,
    pub total_scripts: usize,
    /// Scripts at or above the success-rate threshold.
    pub successful_scripts: usize,
    /// Scripts below the success-rate threshold.
    pub failed_scripts: usize,
    pub data_gaps: Vec<DataGap>,
    pub error_rates: BTreeMap<String, f64>,
    pub success_rates: BTreeMap<String, f64>,
    pub alerts: Vec<Alert>,
    pub overall_success_rate: f64,
    pub overall_error_rate: f64,
}

/// Advisory record derived from an analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Severity,
    pub category: String,
    pub message: String,
    /// Scripts the advice applies to; absent for system-wide advice.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    pub week: u32,
    /// Configured reporting span in weeks.
    pub total_weeks: u32,
    pub report_version: String,
}

/// Headline counts duplicated out of the analysis for quick scanning.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummaryCounts {
    pub total_scripts: usize,
    pub successful_scripts: usize,
    pub failed_scripts: usize,
    pub overall_success_rate: f64,
    pub overall_error_rate: f64,
    pub data_gaps_count: usize,
    pub alerts_count: usize,
}

/// Complete report document for one week.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub metadata: ReportMetadata,
    pub summary: WeekSummaryCounts,
    pub analysis: WeekAnalysis,
    pub recommendations: Vec<Recommendation>,
}

/// Direction of the success-rate trend across recent weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    pub generated_at: String,
    /// Number of weekly reports aggregated.
    pub total_weeks: usize,
    pub report_version: String,
}

/// Totals accumulated across all aggregated weeks.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    pub total_scripts: usize,
    pub total_successful_scripts: usize,
    pub total_failed_scripts: usize,
    pub average_success_rate: f64,
    pub total_data_gaps: usize,
    pub total_alerts: usize,
}

/// One row of the per-week breakdown table.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBreakdown {
    pub week: u32,
    pub success_rate: f64,
    pub data_gaps_count: usize,
    pub alerts_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSet {
    pub success_rate_trend: Trend,
    pub data_gaps_trend: Trend,
    pub error_rate_trend: Trend,
}

/// Aggregate document spanning many weekly reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub metadata: SummaryMetadata,
    pub overall_metrics: OverallMetrics,
    pub weekly_breakdown: Vec<WeekBreakdown>,
    pub trends: TrendSet,
}
