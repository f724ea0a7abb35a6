// src/report/reporter.rs
//! Builds weekly report documents and persists them as pretty-printed
//! JSON in the reports directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;

use super::analysis::{analyze_week, recommendations, success_rate_trend};
use super::model::{
    OverallMetrics, ReportMetadata, SummaryMetadata, SummaryReport, Trend, TrendSet, WeekBreakdown,
    WeekData, WeekSummaryCounts, WeeklyReport, REPORT_VERSION,
};

/// Default directory report files are written to.
pub const DEFAULT_REPORTS_DIR: &str = "./var/reports";

/// File name of the cross-week summary document.
pub const SUMMARY_REPORT_FILE: &str = "data-gap-summary.json";

/// Default reporting span in weeks.
pub const DEFAULT_WEEKS: u32 = 52;

/// Bounds the requested reporting span is clamped to.
pub const MIN_WEEKS: u32 = 1;
pub const MAX_WEEKS: u32 = 104;

/// Handle on the reports directory; cheap to clone.
#[derive(Debug, Clone)]
pub struct WeeklyReporter {
    fs: Arc<dyn FileSystem>,
    reports_dir: PathBuf,
    weeks: u32,
}

impl WeeklyReporter {
    /// `weeks` is clamped to `[MIN_WEEKS, MAX_WEEKS]`.
    pub fn new(fs: Arc<dyn FileSystem>, reports_dir: impl Into<PathBuf>, weeks: u32) -> Self {
        Self {
            fs,
            reports_dir: reports_dir.into(),
            weeks: weeks.clamp(MIN_WEEKS, MAX_WEEKS),
        }
    }

    /// Reporter over [`DEFAULT_REPORTS_DIR`] spanning [`DEFAULT_WEEKS`].
    pub fn with_defaults(fs: Arc<dyn FileSystem>) -> Self {
        Self::new(fs, DEFAULT_REPORTS_DIR, DEFAULT_WEEKS)
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    /// Create the reports directory up front. Fatal, unlike the
    /// non-fatal product log appends.
    pub fn ensure_reports_dir(&self) -> Result<()> {
        self.fs.create_dir_all(&self.reports_dir)?;
        Ok(())
    }

    /// Analyze one week of run data into a full report document.
    pub fn weekly_report(&self, week_data: &WeekData) -> WeeklyReport {
        let analysis = analyze_week(week_data);
        let recommendations = recommendations(&analysis);
        let summary = WeekSummaryCounts {
            total_scripts: analysis.total_scripts,
            successful_scripts: analysis.successful_scripts,
            failed_scripts: analysis.failed_scripts,
            overall_success_rate: analysis.overall_success_rate,
            overall_error_rate: analysis.overall_error_rate,
            data_gaps_count: analysis.data_gaps.len(),
            alerts_count: analysis.alerts.len(),
        };

        WeeklyReport {
            metadata: ReportMetadata {
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                week: analysis.week,
                total_weeks: self.weeks,
                report_version: REPORT_VERSION.to_string(),
            },
            summary,
            analysis,
            recommendations,
        }
    }

    /// Write a weekly report as `weekly-report-<date>-week-<N>.json`.
    pub fn save_weekly_report(&self, report: &WeeklyReport) -> Result<PathBuf> {
        let file_name = weekly_report_filename_at(Utc::now(), report.metadata.week);
        let path = self.reports_dir.join(file_name);
        self.write_json(&path, report)?;
        info!(week = report.metadata.week, path = %path.display(), "weekly report saved");
        Ok(path)
    }

    /// Aggregate many weekly reports into a single summary document.
    ///
    /// Only the success-rate trend is derived from the data; the gap
    /// and error trends report [`Trend::Stable`].
    pub fn summary_report(&self, reports: &[WeeklyReport]) -> SummaryReport {
        let mut metrics = OverallMetrics {
            total_scripts: 0,
            total_successful_scripts: 0,
            total_failed_scripts: 0,
            average_success_rate: 0.0,
            total_data_gaps: 0,
            total_alerts: 0,
        };
        let mut weekly_breakdown = Vec::with_capacity(reports.len());

        for report in reports {
            metrics.total_scripts += report.summary.total_scripts;
            metrics.total_successful_scripts += report.summary.successful_scripts;
            metrics.total_failed_scripts += report.summary.failed_scripts;
            metrics.total_data_gaps += report.summary.data_gaps_count;
            metrics.total_alerts += report.summary.alerts_count;
            weekly_breakdown.push(WeekBreakdown {
                week: report.metadata.week,
                success_rate: report.summary.overall_success_rate,
                data_gaps_count: report.summary.data_gaps_count,
                alerts_count: report.summary.alerts_count,
            });
        }

        if metrics.total_scripts > 0 {
            metrics.average_success_rate =
                metrics.total_successful_scripts as f64 / metrics.total_scripts as f64;
        }

        SummaryReport {
            metadata: SummaryMetadata {
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                total_weeks: reports.len(),
                report_version: REPORT_VERSION.to_string(),
            },
            overall_metrics: metrics,
            weekly_breakdown,
            trends: TrendSet {
                success_rate_trend: success_rate_trend(reports),
                data_gaps_trend: Trend::Stable,
                error_rate_trend: Trend::Stable,
            },
        }
    }

    /// Write a summary report as [`SUMMARY_REPORT_FILE`].
    pub fn save_summary_report(&self, summary: &SummaryReport) -> Result<PathBuf> {
        let path = self.reports_dir.join(SUMMARY_REPORT_FILE);
        self.write_json(&path, summary)?;
        info!(path = %path.display(), "summary report saved");
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.fs.write(path, json.as_bytes())?;
        Ok(())
    }
}

/// Report filename for the report generated at `now`:
/// `weekly-report-2026-08-24-week-12.json`.
pub fn weekly_report_filename_at(now: DateTime<Utc>, week: u32) -> String {
    format!("weekly-report-{}-week-{}.json", now.format("%Y-%m-%d"), week)
}
