// src/report/analysis.rs
//! Pure analysis over weekly run data.
//!
//! Thresholds:
//! - A script below [`SUCCESS_RATE_THRESHOLD`] is recorded as a data
//!   gap and counts as failed for the week.
//! - A script above [`ERROR_RATE_THRESHOLD`] raises an `error_rate`
//!   alert.
//! - An overall success rate below the success threshold raises an
//!   `overall_performance` alert.

use std::collections::BTreeMap;

use super::model::{
    Alert, DataGap, Recommendation, Severity, Trend, WeekAnalysis, WeekData, WeeklyReport,
};

/// Minimum success rate considered healthy, per script and overall.
pub const SUCCESS_RATE_THRESHOLD: f64 = 0.95;

/// Maximum per-script error rate before an alert is raised.
pub const ERROR_RATE_THRESHOLD: f64 = 0.05;

fn gap_severity(success_rate: f64) -> Severity {
    if success_rate < 0.5 {
        Severity::Critical
    } else if success_rate < 0.8 {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Analyzes one week of run data.
///
/// A script with zero recorded runs rates 0.0 and is a critical gap.
pub fn analyze_week(week: &WeekData) -> WeekAnalysis {
    let mut successful_scripts = 0;
    let mut failed_scripts = 0;
    let mut data_gaps = Vec::new();
    let mut error_rates = BTreeMap::new();
    let mut success_rates = BTreeMap::new();
    let mut alerts = Vec::new();

    for script in &week.scripts {
        let total_runs = script.results.len();
        let successful_runs = script.results.iter().filter(|ok| **ok).count();
        let success_rate = if total_runs > 0 {
            successful_runs as f64 / total_runs as f64
        } else {
            0.0
        };
        let error_rate = 1.0 - success_rate;

        success_rates.insert(script.name.clone(), success_rate);
        error_rates.insert(script.name.clone(), error_rate);

        if success_rate >= SUCCESS_RATE_THRESHOLD {
            successful_scripts += 1;
        } else {
            failed_scripts += 1;
            data_gaps.push(DataGap {
                script: script.name.clone(),
                success_rate,
                missing_data: 1.0 - success_rate,
                severity: gap_severity(success_rate),
            });
        }

        if error_rate > ERROR_RATE_THRESHOLD {
            alerts.push(Alert::ErrorRate {
                script: script.name.clone(),
                error_rate,
                threshold: ERROR_RATE_THRESHOLD,
                severity: if error_rate > 0.2 {
                    Severity::Critical
                } else {
                    Severity::High
                },
            });
        }
    }

    let total_scripts = week.scripts.len();
    let overall_success_rate = if total_scripts > 0 {
        successful_scripts as f64 / total_scripts as f64
    } else {
        0.0
    };
    let overall_error_rate = 1.0 - overall_success_rate;

    if overall_success_rate < SUCCESS_RATE_THRESHOLD {
        alerts.push(Alert::OverallPerformance {
            overall_success_rate,
            threshold: SUCCESS_RATE_THRESHOLD,
            severity: if overall_success_rate < 0.5 {
                Severity::Critical
            } else {
                Severity::High
            },
        });
    }

    WeekAnalysis {
        week: week.week,
        total_scripts,
        successful_scripts,
        failed_scripts,
        data_gaps,
        error_rates,
        success_rates,
        alerts,
        overall_success_rate,
        overall_error_rate,
    }
}

/// Derives advisory records from a week's analysis.
///
/// Medium-severity gaps produce no recommendation on their own.
pub fn recommendations(analysis: &WeekAnalysis) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let critical_gaps: Vec<&DataGap> = analysis
        .data_gaps
        .iter()
        .filter(|gap| gap.severity == Severity::Critical)
        .collect();
    let high_gaps: Vec<&DataGap> = analysis
        .data_gaps
        .iter()
        .filter(|gap| gap.severity == Severity::High)
        .collect();

    if !critical_gaps.is_empty() {
        recs.push(Recommendation {
            priority: Severity::Critical,
            category: "data_gaps".to_string(),
            message: format!(
                "{} scripts have critical data gaps (success rate < 50%)",
                critical_gaps.len()
            ),
            scripts: critical_gaps.iter().map(|gap| gap.script.clone()).collect(),
            action: "Immediate investigation and remediation required".to_string(),
        });
    }

    if !high_gaps.is_empty() {
        recs.push(Recommendation {
            priority: Severity::High,
            category: "data_gaps".to_string(),
            message: format!(
                "{} scripts have high data gaps (success rate < 80%)",
                high_gaps.len()
            ),
            scripts: high_gaps.iter().map(|gap| gap.script.clone()).collect(),
            action: "Schedule investigation within 24 hours".to_string(),
        });
    }

    let critical_error_scripts: Vec<String> = analysis
        .alerts
        .iter()
        .filter_map(|alert| match alert {
            Alert::ErrorRate {
                script,
                severity: Severity::Critical,
                ..
            } => Some(script.clone()),
            _ => None,
        })
        .collect();

    if !critical_error_scripts.is_empty() {
        recs.push(Recommendation {
            priority: Severity::Critical,
            category: "error_rates".to_string(),
            message: format!(
                "{} scripts have critical error rates (> 20%)",
                critical_error_scripts.len()
            ),
            scripts: critical_error_scripts,
            action: "Check API endpoints and script configurations immediately".to_string(),
        });
    }

    if analysis.overall_success_rate < 0.8 {
        recs.push(Recommendation {
            priority: Severity::High,
            category: "overall_performance".to_string(),
            message: format!(
                "Overall success rate is {:.1}%",
                analysis.overall_success_rate * 100.0
            ),
            scripts: Vec::new(),
            action: "Review all scripts and consider system-wide improvements".to_string(),
        });
    }

    recs
}

/// Compares the 2 most recent weekly success rates against the 2
/// before them. Fewer than 4 reports is always [`Trend::Stable`].
pub fn success_rate_trend(reports: &[WeeklyReport]) -> Trend {
    if reports.len() < 4 {
        return Trend::Stable;
    }

    let rate = |report: &WeeklyReport| report.summary.overall_success_rate;
    let recent = &reports[reports.len() - 2..];
    let older = &reports[reports.len() - 4..reports.len() - 2];
    let recent_avg = recent.iter().map(rate).sum::<f64>() / recent.len() as f64;
    let older_avg = older.iter().map(rate).sum::<f64>() / older.len() as f64;

    if recent_avg > older_avg * 1.05 {
        Trend::Improving
    } else if recent_avg < older_avg * 0.95 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
