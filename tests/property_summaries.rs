// tests/property_summaries.rs

use std::time::Duration;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use curl_runner::exec::classify;
use curl_runner::logbook::log_filename_at;
use curl_runner::runner::{summarize, ExecutionResult};

fn outcome_strategy() -> impl Strategy<Value = Vec<(bool, u64)>> {
    proptest::collection::vec((any::<bool>(), 0..10_000u64), 0..40)
}

// Lowercase filler cannot contain digits or an uppercase marker, so it
// can never form a competing status pattern around the real one.
fn filler() -> impl Strategy<Value = String> {
    "[a-z \n]{0,40}"
}

proptest! {
    #[test]
    fn summary_counts_always_add_up(outcomes in outcome_strategy()) {
        let results: Vec<ExecutionResult> = outcomes
            .iter()
            .enumerate()
            .map(|(i, (ok, ms))| {
                let script_name = format!("script_{i}.sh");
                let duration = Duration::from_millis(*ms);
                if *ok {
                    ExecutionResult::Success {
                        script_name,
                        output: String::new(),
                        http_status: Some(200),
                        duration,
                    }
                } else {
                    ExecutionResult::Failure {
                        script_name,
                        error: "HTTP 500 error".to_string(),
                        http_status: Some(500),
                        duration,
                    }
                }
            })
            .collect();

        let summary = summarize(&results);

        prop_assert_eq!(summary.total, results.len());
        prop_assert_eq!(summary.succeeded + summary.failed, summary.total);
        prop_assert_eq!(
            summary.succeeded,
            results.iter().filter(|r| r.is_success()).count()
        );
        let expected: Duration = outcomes.iter().map(|(_, ms)| Duration::from_millis(*ms)).sum();
        prop_assert_eq!(summary.total_duration, expected);
    }

    #[test]
    fn marker_survives_any_surrounding_noise(
        status in 100..=999u16,
        prefix in filler(),
        suffix in filler(),
    ) {
        let stdout = format!("{prefix}HTTP Status: {status}\n{suffix}");

        let verdict = classify(&stdout, "");

        prop_assert_eq!(verdict.http_status, Some(status));
        prop_assert_eq!(verdict.is_api_error, status >= 400);
        if status >= 400 {
            prop_assert_eq!(verdict.error_message, Some(format!("HTTP {status} error")));
        } else {
            prop_assert_eq!(verdict.error_message, None);
        }
    }

    #[test]
    fn run_log_filenames_stay_filesystem_safe(name in "\\PC{0,30}") {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 10, 30, 0).unwrap();

        let file_name = log_filename_at(now, Some(&name));

        prop_assert!(file_name.ends_with(".log"));
        prop_assert!(
            file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'),
            "unsafe character in {:?}",
            file_name
        );
    }
}
