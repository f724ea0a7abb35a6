// tests/runner_plans.rs

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use curl_runner::config::RunnerConfig;
use curl_runner::errors::RunnerError;
use curl_runner::fs::mock::MockFileSystem;
use curl_runner::fs::FileSystem;
use curl_runner::logbook::{ERROR_LOG_FILE, REPORT_LOG_FILE};
use curl_runner::runner::{summarize, ConcurrencyPlan, Runner};
use curl_runner::scripts::Script;
use curl_runner_test_utils::builders::{ExecOutputBuilder, RunnerConfigBuilder};
use curl_runner_test_utils::fake_executor::FakeExecutor;
use curl_runner_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

const SCRIPTS_DIR: &str = "scripts";
const LOGS_DIR: &str = "logs";

fn test_config() -> RunnerConfig {
    RunnerConfigBuilder::new()
        .scripts_dir(SCRIPTS_DIR)
        .logs_dir(LOGS_DIR)
        .script_delay_ms(0)
        .batch_delay_ms(0)
        .build()
}

/// Mock filesystem with the logs dir plus one file per script name.
fn setup(names: &[&str]) -> (MockFileSystem, Vec<Script>, Arc<Mutex<Vec<String>>>) {
    let mock = MockFileSystem::new();
    mock.add_dir(LOGS_DIR);

    let scripts: Vec<Script> = names
        .iter()
        .map(|name| {
            let script = Script::new(*name, Path::new(SCRIPTS_DIR));
            mock.add_file(&script.path, "#!/bin/bash\n");
            script
        })
        .collect();

    (mock, scripts, Arc::new(Mutex::new(Vec::new())))
}

fn runner_with(mock: &MockFileSystem, executor: FakeExecutor) -> Runner<FakeExecutor> {
    Runner::new(test_config(), Arc::new(mock.clone()), executor)
}

/// The per-run log has a timestamped name, so find it by prefix.
fn run_log_contents(mock: &MockFileSystem) -> String {
    let entries = mock.read_dir(Path::new(LOGS_DIR)).unwrap();
    let path = entries
        .iter()
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("run_"))
        })
        .expect("run log should exist");
    mock.contents(path).unwrap()
}

#[tokio::test]
async fn sequential_results_match_input_order() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["b.sh", "a.sh", "c.sh"]);
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    // One result per input, position-matched; not sorted.
    let names: Vec<&str> = results.iter().map(|r| r.script_name()).collect();
    assert_eq!(names, vec!["b.sh", "a.sh", "c.sh"]);
    assert_eq!(*executed.lock().unwrap(), vec!["b.sh", "a.sh", "c.sh"]);
    assert!(results.iter().all(|r| r.is_success()));

    Ok(())
}

#[tokio::test]
async fn parallel_plan_reports_all_successes() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["a.sh", "b.sh", "c.sh"]);
    let executor = FakeExecutor::new(executed.clone())
        .with_output("a.sh", ExecOutputBuilder::new().http_status(200).build())
        .with_output("b.sh", ExecOutputBuilder::new().http_status(200).build())
        .with_output("c.sh", ExecOutputBuilder::new().http_status(200).build());
    let runner = runner_with(&mock, executor);

    let results = with_timeout(runner.run(&scripts, ConcurrencyPlan::Unlimited)).await?;

    let summary = summarize(&results);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    assert!(results.iter().all(|r| r.http_status() == Some(200)));

    Ok(())
}

#[tokio::test]
async fn api_error_becomes_failure_with_status() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["ok.sh", "bad.sh"]);
    let executor = FakeExecutor::new(executed.clone())
        .with_output("ok.sh", ExecOutputBuilder::new().http_status(200).build())
        .with_output("bad.sh", ExecOutputBuilder::new().http_status(500).build());
    let runner = runner_with(&mock, executor);

    let results = with_timeout(runner.run(&scripts, ConcurrencyPlan::Unlimited)).await?;

    assert!(results[0].is_success());
    assert!(!results[1].is_success());
    assert_eq!(results[1].http_status(), Some(500));
    assert_eq!(results[1].error(), Some("HTTP 500 error"));

    let report = mock
        .contents(Path::new(LOGS_DIR).join(REPORT_LOG_FILE))
        .unwrap();
    assert!(report.contains("SUCCESS: ok.sh"));
    assert!(report.contains("API ERROR: bad.sh"));

    let error_log = mock
        .contents(Path::new(LOGS_DIR).join(ERROR_LOG_FILE))
        .unwrap();
    assert!(error_log.contains("API ERROR: bad.sh (HTTP 500 server_error)"));
    assert!(error_log.contains("Error: HTTP 500 error"));

    Ok(())
}

#[tokio::test]
async fn fixed_batches_chunk_in_input_order() -> TestResult {
    init_tracing();
    let names = ["s1.sh", "s2.sh", "s3.sh", "s4.sh", "s5.sh", "s6.sh", "s7.sh"];
    let (mock, scripts, executed) = setup(&names);
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let plan = ConcurrencyPlan::FixedBatch {
        batch_size: 3,
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert_eq!(results.len(), 7);
    let result_names: Vec<&str> = results.iter().map(|r| r.script_name()).collect();
    assert_eq!(result_names, names);

    // 7 scripts in batches of 3 -> 3/3/1.
    let log = run_log_contents(&mock);
    assert!(log.contains("Starting batch 1/3 with scripts: s1.sh, s2.sh, s3.sh"));
    assert!(log.contains("Starting batch 2/3 with scripts: s4.sh, s5.sh, s6.sh"));
    assert!(log.contains("Starting batch 3/3 with scripts: s7.sh"));

    let report = mock
        .contents(Path::new(LOGS_DIR).join(REPORT_LOG_FILE))
        .unwrap();
    assert!(report.contains("CONCURRENT START: Running 7 scripts in batches of 3"));
    assert!(report.contains("across 3 batches"));

    Ok(())
}

#[tokio::test]
async fn bounded_pool_runs_everything_in_order() -> TestResult {
    init_tracing();
    let names = ["a.sh", "b.sh", "c.sh", "d.sh", "e.sh"];
    let (mock, scripts, executed) = setup(&names);
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let plan = ConcurrencyPlan::Bounded { max_concurrent: 2 };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert_eq!(results.len(), 5);
    let result_names: Vec<&str> = results.iter().map(|r| r.script_name()).collect();
    assert_eq!(result_names, names);
    assert_eq!(executed.lock().unwrap().len(), 5);

    let log = run_log_contents(&mock);
    assert!(log.contains("Starting batch 3/3"));

    Ok(())
}

#[tokio::test]
async fn missing_script_is_a_result_not_an_error() -> TestResult {
    init_tracing();
    let (mock, mut scripts, executed) = setup(&["ok1.sh", "ok2.sh"]);
    // Splice in a script whose file was never created.
    scripts.insert(1, Script::new("ghost.sh", Path::new(SCRIPTS_DIR)));
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_success());
    assert!(!results[1].is_success());
    assert!(results[2].is_success());
    assert!(results[1].error().unwrap().contains("not found in"));

    // The missing script never reached the executor.
    assert_eq!(*executed.lock().unwrap(), vec!["ok1.sh", "ok2.sh"]);

    Ok(())
}

#[tokio::test]
async fn zero_batch_size_fails_before_spawning() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["a.sh"]);
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let plan = ConcurrencyPlan::FixedBatch {
        batch_size: 0,
        delay: Duration::ZERO,
    };
    let result = runner.run(&scripts, plan).await;

    match result {
        Err(RunnerError::InvalidConcurrency(msg)) => {
            assert!(msg.contains(">= 1"));
        }
        Err(e) => panic!("Expected InvalidConcurrency error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    // Nothing ran and no run log was opened.
    assert!(executed.lock().unwrap().is_empty());
    assert!(mock.read_dir(Path::new(LOGS_DIR))?.is_empty());

    Ok(())
}

#[tokio::test]
async fn zero_max_concurrent_fails_before_spawning() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["a.sh"]);
    let runner = runner_with(&mock, FakeExecutor::new(executed.clone()));

    let result = runner
        .run(&scripts, ConcurrencyPlan::Bounded { max_concurrent: 0 })
        .await;

    assert!(matches!(result, Err(RunnerError::InvalidConcurrency(_))));
    assert!(executed.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn empty_script_list_completes_without_logging() -> TestResult {
    init_tracing();
    let (mock, _, executed) = setup(&[]);
    let runner = runner_with(&mock, FakeExecutor::new(executed));

    let results = with_timeout(runner.run(&[], ConcurrencyPlan::Unlimited)).await?;

    assert!(results.is_empty());
    assert!(mock.read_dir(Path::new(LOGS_DIR))?.is_empty());

    Ok(())
}

#[tokio::test]
async fn nonzero_exit_reports_the_exit_code() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["x.sh"]);
    let executor = FakeExecutor::new(executed)
        .with_output("x.sh", ExecOutputBuilder::new().exit_code(3).build());
    let runner = runner_with(&mock, executor);

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert_eq!(
        results[0].error(),
        Some("Error executing x.sh: process exited with code 3")
    );
    assert_eq!(results[0].http_status(), None);

    let report = mock
        .contents(Path::new(LOGS_DIR).join(REPORT_LOG_FILE))
        .unwrap();
    assert!(report.contains("FAILED: x.sh"));
    assert!(report.contains("- process exited with code 3"));

    Ok(())
}

#[tokio::test]
async fn stderr_becomes_the_failure_message() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["x.sh"]);
    let executor = FakeExecutor::new(executed).with_output(
        "x.sh",
        ExecOutputBuilder::new()
            .exit_code(1)
            .stderr("boom: connection reset\n")
            .build(),
    );
    let runner = runner_with(&mock, executor);

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert_eq!(results[0].error(), Some("boom: connection reset\n"));

    let log = run_log_contents(&mock);
    assert!(log.contains("ERROR: Error executing x.sh: process exited with code 1"));
    assert!(log.contains("STDERR: boom: connection reset"));

    Ok(())
}

#[tokio::test]
async fn spawn_failure_is_a_failure_result() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["x.sh"]);
    let executor = FakeExecutor::new(executed).with_output(
        "x.sh",
        ExecOutputBuilder::new()
            .spawn_failed("failed to spawn bash: No such file or directory")
            .build(),
    );
    let runner = runner_with(&mock, executor);

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert!(!results[0].is_success());
    assert!(results[0].error().unwrap().contains("failed to spawn bash"));

    Ok(())
}

#[tokio::test]
async fn failure_recovers_status_from_raw_curl_output() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["x.sh"]);
    // No plain marker, but the raw response line is in stdout.
    let executor = FakeExecutor::new(executed).with_output(
        "x.sh",
        ExecOutputBuilder::new()
            .exit_code(22)
            .stdout("< HTTP/1.1 404 Not Found\n")
            .build(),
    );
    let runner = runner_with(&mock, executor);

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    let results = with_timeout(runner.run(&scripts, plan)).await?;

    assert!(!results[0].is_success());
    assert_eq!(results[0].http_status(), Some(404));

    Ok(())
}

#[tokio::test]
async fn run_log_records_the_whole_story() -> TestResult {
    init_tracing();
    let (mock, scripts, executed) = setup(&["a.sh"]);
    let executor = FakeExecutor::new(executed).with_output(
        "a.sh",
        ExecOutputBuilder::new()
            .stdout("hello\n")
            .http_status(200)
            .build(),
    );
    let runner = runner_with(&mock, executor);

    let plan = ConcurrencyPlan::Sequential {
        delay: Duration::ZERO,
    };
    with_timeout(runner.run(&scripts, plan)).await?;

    let log = run_log_contents(&mock);
    assert!(log.contains("Starting batch execution of 1 scripts"));
    assert!(log.contains("Scripts to run: a.sh"));
    assert!(log.contains("Starting execution of script: a.sh"));
    assert!(log.contains("SUCCESS: a.sh completed successfully in"));
    assert!(log.contains("OUTPUT: hello"));
    assert!(log.contains("Batch execution completed: 1 successful, 0 failed, 1 total"));

    let report = mock
        .contents(Path::new(LOGS_DIR).join(REPORT_LOG_FILE))
        .unwrap();
    assert!(report.contains("BATCH START: Running 1 scripts"));
    assert!(report.contains("BATCH COMPLETE: 1/1 successful (0 failed)"));

    Ok(())
}
