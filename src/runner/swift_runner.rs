// src/runner/swift_runner.rs

//! The runner that actually drives a Swift compile.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info_span};

use crate::compile::Runner;
use crate::config::ConfigFile;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::process::run_subprocess;
use crate::types::WRAPPER_FAILURE_EXIT_CODE;

use super::args::{Placeholders, ProcessedArgs, process_arguments};
use super::index_import::run_index_import;

/// Runs the tool named by the first (expanded) argument and, after a
/// successful compile, imports its index store when asked to.
#[derive(Debug, Clone)]
pub struct SwiftRunner {
    args: Vec<String>,
    index_import_path: PathBuf,
    placeholders: Placeholders,
    fs: Arc<dyn FileSystem>,
}

impl SwiftRunner {
    /// Create a runner reading placeholder values from the environment.
    pub fn new(args: Vec<String>, index_import_path: impl Into<PathBuf>) -> Self {
        Self {
            args,
            index_import_path: index_import_path.into(),
            placeholders: Placeholders::resolve(&ConfigFile::default()),
            fs: Arc::new(RealFileSystem),
        }
    }

    /// Create a runner whose placeholder values honour `config`.
    pub fn from_config(
        args: Vec<String>,
        index_import_path: impl Into<PathBuf>,
        config: &ConfigFile,
    ) -> Self {
        Self::new(args, index_import_path).with_placeholders(Placeholders::resolve(config))
    }

    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// The tool invocation this runner would perform, without running it.
    pub fn processed_arguments(&self) -> Result<ProcessedArgs> {
        process_arguments(&self.args, self.fs.as_ref(), &self.placeholders)
    }

    fn try_run(&self, sink: &mut dyn Write, stdout_to_stderr: bool) -> Result<i32> {
        let mut processed = self.processed_arguments()?;

        let _span = info_span!(
            "swift_compile",
            label = processed.target_label.as_deref().unwrap_or("<unknown>")
        )
        .entered();

        // Removed on drop, whichever way this function returns.
        let _module_cache = if processed.ephemeral_module_cache {
            let dir = tempfile::Builder::new()
                .prefix("swift-module-cache.")
                .tempdir()?;
            debug!(path = ?dir.path(), "using ephemeral module cache");
            processed.tool_args.push("-module-cache-path".to_string());
            processed
                .tool_args
                .push(dir.path().to_string_lossy().into_owned());
            Some(dir)
        } else {
            None
        };

        let code = run_subprocess(
            &processed.tool,
            &processed.tool_args,
            sink,
            stdout_to_stderr,
        )?;
        debug!(tool = %processed.tool, exit_code = code, "tool finished");

        if code != 0 {
            return Ok(code);
        }

        match (&processed.index_store_path, &processed.global_index_store) {
            (Some(local), Some(global)) => run_index_import(
                &self.index_import_path,
                local,
                global,
                self.fs.as_ref(),
                sink,
                stdout_to_stderr,
            ),
            _ => Ok(code),
        }
    }
}

impl Runner for SwiftRunner {
    fn run(self, stderr: &mut dyn Write, stdout_to_stderr: bool) -> i32 {
        match self.try_run(stderr, stdout_to_stderr) {
            Ok(code) => code,
            Err(err) => {
                error!(error = %err, "swift runner failed");
                let _ = writeln!(stderr, "swift-worker: error: {err}");
                let _ = stderr.flush();
                WRAPPER_FAILURE_EXIT_CODE
            }
        }
    }
}
