// src/compile.rs

//! Single-shot compilation, without a persistent worker.

use std::io::{self, Write};

use crate::runner::SwiftRunner;

/// Something that can run one compile and report its exit code.
///
/// `stderr` receives the compile's diagnostics. When `stdout_to_stderr` is
/// set, the tool's stdout is merged into `stderr` too; otherwise it goes to
/// this process's stdout.
pub trait Runner {
    fn run(self, stderr: &mut dyn Write, stdout_to_stderr: bool) -> i32;
}

/// Run one compile with `args`, diagnostics on this process's stderr, and
/// return the tool's exit code unchanged.
pub fn compile_without_worker(args: &[String], index_import_path: &str) -> i32 {
    compile_without_worker_with(
        args,
        index_import_path,
        |args, path| SwiftRunner::new(args, path),
        &mut io::stderr(),
    )
}

/// [`compile_without_worker`] with the runner and the error sink injected.
pub fn compile_without_worker_with<R, F>(
    args: &[String],
    index_import_path: &str,
    make_runner: F,
    stderr: &mut dyn Write,
) -> i32
where
    R: Runner,
    F: FnOnce(Vec<String>, String) -> R,
{
    make_runner(args.to_vec(), index_import_path.to_string()).run(stderr, false)
}
