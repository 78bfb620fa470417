// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `swift-worker`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "swift-worker",
    version,
    about = "Run a Swift compile action once and forward its diagnostics to stderr.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the `index-import` tool.
    ///
    /// If omitted, `[runner].index_import_path` from the config file, then
    /// `SWIFT_WORKER_INDEX_IMPORT`, then `index-import` on `PATH`.
    #[arg(long, value_name = "PATH")]
    pub index_import_path: Option<String>,

    /// Optional TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SWIFT_WORKER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the processed tool invocation, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// The tool followed by its arguments. `@file` arguments are params
    /// files.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "TOOL_ARGS"
    )]
    pub args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
