// src/runner/index_import.rs

//! Importing an action's local index store into a global one.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::errors::{Result, WorkerError};
use crate::fs::FileSystem;
use crate::process::run_subprocess;

/// Arguments passed to `index-import` for one import.
pub fn index_import_args(local_store: &str, global_store: &str) -> Vec<String> {
    vec![
        "-incremental".to_string(),
        local_store.to_string(),
        global_store.to_string(),
    ]
}

/// Run `index-import` and return its exit code.
///
/// A bare program name (no directory part) is looked up on `PATH` by the
/// OS; anything with a directory part must exist as a file.
pub fn run_index_import(
    index_import_path: &Path,
    local_store: &str,
    global_store: &str,
    fs: &dyn FileSystem,
    sink: &mut dyn Write,
    stdout_to_stderr: bool,
) -> Result<i32> {
    if index_import_path.as_os_str().is_empty() {
        return Err(WorkerError::Config(
            "an index store import was requested but the index-import path is empty".to_string(),
        ));
    }

    let has_dir_part = index_import_path
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    if has_dir_part && !fs.is_file(index_import_path) {
        return Err(WorkerError::Config(format!(
            "index-import not found at {:?}",
            index_import_path
        )));
    }

    info!(
        tool = ?index_import_path,
        local_store,
        global_store,
        "importing index store"
    );

    let program = index_import_path.to_string_lossy();
    run_subprocess(
        &program,
        &index_import_args(local_store, global_store),
        sink,
        stdout_to_stderr,
    )
}
