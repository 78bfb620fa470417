// src/lib.rs

pub mod cli;
pub mod compile;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod process;
pub mod runner;
pub mod types;

use std::io::{self, Write};

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_optional;
use crate::runner::SwiftRunner;

pub use crate::compile::{Runner, compile_without_worker, compile_without_worker_with};

/// Environment variable consulted for the index-import path when neither
/// the CLI nor the config file names one.
pub const INDEX_IMPORT_ENV: &str = "SWIFT_WORKER_INDEX_IMPORT";

/// Fallback index-import program, resolved through `PATH`.
pub const DEFAULT_INDEX_IMPORT: &str = "index-import";

/// High-level entry point used by `main.rs`.
///
/// Loads the optional config, resolves the index-import path, then either
/// prints the planned invocation (`--dry-run`) or runs one compile and
/// returns its exit code.
pub fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_optional(args.config.as_deref())?;

    let index_import_path = resolve_index_import_path(
        args.index_import_path.as_deref(),
        &cfg,
        std::env::var(INDEX_IMPORT_ENV).ok(),
    );
    debug!(index_import_path = %index_import_path, "resolved index-import path");

    if args.dry_run {
        let runner = SwiftRunner::from_config(args.args, index_import_path.clone(), &cfg);
        write_dry_run(&runner, &index_import_path, &mut io::stdout().lock())?;
        return Ok(0);
    }

    let code = compile_without_worker_with(
        &args.args,
        &index_import_path,
        |tool_args, path| SwiftRunner::from_config(tool_args, path, &cfg),
        &mut io::stderr(),
    );
    Ok(code)
}

/// Pick the index-import path: CLI flag, then config file, then the
/// environment, then [`DEFAULT_INDEX_IMPORT`].
pub fn resolve_index_import_path(
    cli_value: Option<&str>,
    cfg: &ConfigFile,
    env_value: Option<String>,
) -> String {
    cli_value
        .map(str::to_string)
        .or_else(|| cfg.runner.index_import_path.clone())
        .or(env_value.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_INDEX_IMPORT.to_string())
}

/// Dry-run output: the tool, its arguments and wrapper settings.
fn write_dry_run(
    runner: &SwiftRunner,
    index_import_path: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let processed = runner.processed_arguments()?;

    writeln!(out, "swift-worker dry-run")?;
    writeln!(out, "  tool: {}", processed.tool)?;
    writeln!(out, "  args ({}):", processed.tool_args.len())?;
    for arg in processed.tool_args.iter() {
        writeln!(out, "    {arg}")?;
    }
    if processed.ephemeral_module_cache {
        writeln!(out, "  ephemeral_module_cache: true")?;
    }
    if let Some(ref label) = processed.target_label {
        writeln!(out, "  target_label: {label}")?;
    }
    if let (Some(local), Some(global)) =
        (&processed.index_store_path, &processed.global_index_store)
    {
        writeln!(
            out,
            "  index_import: {index_import_path} -incremental {local} {global}"
        )?;
    }
    out.flush()?;

    debug!("dry-run complete (no execution)");
    Ok(())
}
