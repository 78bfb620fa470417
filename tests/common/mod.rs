#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub use swift_worker_test_utils::init_tracing;

static EXEC_LOCK: Mutex<()> = Mutex::new(());

/// Serialise tests that spawn processes within one test binary.
///
/// A script written while another test thread forks can stay open in that
/// child and make `exec` of the script fail with ETXTBSY.
pub fn exec_lock() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write an executable `sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Write a params file, one argument per line.
pub fn write_params_file(dir: &Path, name: &str, args: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut body = args.join("\n");
    body.push('\n');
    std::fs::write(&path, body).unwrap();
    path
}
