use std::io::Write;
use std::sync::{Arc, Mutex};

use swift_worker::Runner;

/// What a [`FakeRunner`] was constructed with and how it was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    pub args: Vec<String>,
    pub index_import_path: String,
    pub stdout_to_stderr: bool,
}

/// A runner that:
/// - records its inputs and the redirection flag it was run with
/// - writes a canned diagnostic to the error sink
/// - returns a fixed exit code.
pub struct FakeRunner {
    args: Vec<String>,
    index_import_path: String,
    exit_code: i32,
    diagnostic: String,
    runs: Arc<Mutex<Vec<RecordedRun>>>,
}

impl FakeRunner {
    /// Factory matching `compile_without_worker_with`'s `make_runner`.
    pub fn factory(
        exit_code: i32,
        diagnostic: &str,
        runs: Arc<Mutex<Vec<RecordedRun>>>,
    ) -> impl FnOnce(Vec<String>, String) -> FakeRunner {
        let diagnostic = diagnostic.to_string();
        move |args, index_import_path| FakeRunner {
            args,
            index_import_path,
            exit_code,
            diagnostic,
            runs,
        }
    }
}

impl Runner for FakeRunner {
    fn run(self, stderr: &mut dyn Write, stdout_to_stderr: bool) -> i32 {
        if !self.diagnostic.is_empty() {
            let _ = stderr.write_all(self.diagnostic.as_bytes());
        }

        let mut guard = self.runs.lock().unwrap();
        guard.push(RecordedRun {
            args: self.args,
            index_import_path: self.index_import_path,
            stdout_to_stderr,
        });

        self.exit_code
    }
}
