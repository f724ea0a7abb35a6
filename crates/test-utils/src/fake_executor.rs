use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use curl_runner::exec::{ExecOutput, ExecStatus, ScriptExecutor};
use curl_runner::scripts::Script;

/// A fake executor that:
/// - records which scripts were "run", in start order
/// - resolves immediately with a canned [`ExecOutput`] per script name,
///   or a clean empty exit for names without one.
#[derive(Debug)]
pub struct FakeExecutor {
    outputs: HashMap<String, ExecOutput>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            outputs: HashMap::new(),
            executed,
        }
    }

    /// Set the canned output for one script name.
    pub fn with_output(mut self, name: &str, output: ExecOutput) -> Self {
        self.outputs.insert(name.to_string(), output);
        self
    }
}

impl ScriptExecutor for FakeExecutor {
    fn run_script<'a>(
        &'a self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.executed.lock().unwrap();
                guard.push(script.name.clone());
            }

            self.outputs
                .get(&script.name)
                .cloned()
                .unwrap_or_else(clean_exit)
        })
    }
}

fn clean_exit() -> ExecOutput {
    ExecOutput {
        stdout: String::new(),
        stderr: String::new(),
        status: ExecStatus::Exited(0),
        duration: Duration::from_millis(1),
    }
}
