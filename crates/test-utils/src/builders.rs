#![allow(dead_code)]

use std::time::Duration;

use curl_runner::config::{RawConfigFile, RunnerConfig};
use curl_runner::exec::{ExecOutput, ExecStatus};

/// Builder for `ExecOutput` to simplify faking script runs.
pub struct ExecOutputBuilder {
    output: ExecOutput,
}

impl ExecOutputBuilder {
    /// Starts from a clean exit with empty output.
    pub fn new() -> Self {
        Self {
            output: ExecOutput {
                stdout: String::new(),
                stderr: String::new(),
                status: ExecStatus::Exited(0),
                duration: Duration::from_millis(5),
            },
        }
    }

    pub fn stdout(mut self, text: &str) -> Self {
        self.output.stdout = text.to_string();
        self
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.output.stderr = text.to_string();
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.output.status = ExecStatus::Exited(code);
        self
    }

    pub fn spawn_failed(mut self, msg: &str) -> Self {
        self.output.status = ExecStatus::SpawnFailed(msg.to_string());
        self
    }

    /// Append the `HTTP Status: <code>` marker line scripts print.
    pub fn http_status(mut self, status: u16) -> Self {
        self.output
            .stdout
            .push_str(&format!("HTTP Status: {}\n", status));
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.output.duration = Duration::from_millis(ms);
        self
    }

    pub fn build(self) -> ExecOutput {
        self.output
    }
}

impl Default for ExecOutputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RunnerConfig` to simplify test setup.
pub struct RunnerConfigBuilder {
    raw: RawConfigFile,
}

impl RunnerConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
        }
    }

    pub fn scripts_dir(mut self, dir: &str) -> Self {
        self.raw.scripts_dir = dir.to_string();
        self
    }

    pub fn logs_dir(mut self, dir: &str) -> Self {
        self.raw.logs_dir = dir.to_string();
        self
    }

    pub fn script_delay_ms(mut self, ms: u64) -> Self {
        self.raw.script_delay_ms = ms;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.raw.batch_size = size;
        self
    }

    pub fn batch_delay_ms(mut self, ms: u64) -> Self {
        self.raw.batch_delay_ms = ms;
        self
    }

    pub fn build(self) -> RunnerConfig {
        RunnerConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for RunnerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
