// src/runner/args.rs

//! Turning the raw wrapper argument list into a tool invocation.
//!
//! Steps, in order:
//! 1. Expand `@params` files (one argument per line, one level deep).
//! 2. Pull out `-Xwrapped-swift=...` flags.
//! 3. Substitute Bazel's Xcode placeholders.
//! 4. Split off the tool (first remaining argument).

use std::path::Path;

use tracing::{debug, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, WorkerError};
use crate::fs::FileSystem;
use crate::types::{
    DEVELOPER_DIR_PLACEHOLDER, SDKROOT_PLACEHOLDER, WRAPPED_SWIFT_PREFIX, WrappedSwiftFlag,
};

const INDEX_STORE_PATH_FLAG: &str = "-index-store-path";

/// Values substituted for Bazel's Xcode placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub developer_dir: Option<String>,
    pub sdkroot: Option<String>,
}

impl Placeholders {
    /// Read `DEVELOPER_DIR` and `SDKROOT` from the environment, letting
    /// `[placeholders]` entries in the config file win.
    pub fn resolve(config: &ConfigFile) -> Self {
        Self {
            developer_dir: config
                .placeholders
                .developer_dir
                .clone()
                .or_else(|| std::env::var("DEVELOPER_DIR").ok()),
            sdkroot: config
                .placeholders
                .sdkroot
                .clone()
                .or_else(|| std::env::var("SDKROOT").ok()),
        }
    }

    fn substitute(&self, arg: &str) -> Result<String> {
        let mut out = arg.to_string();
        for (placeholder, value) in [
            (DEVELOPER_DIR_PLACEHOLDER, &self.developer_dir),
            (SDKROOT_PLACEHOLDER, &self.sdkroot),
        ] {
            if !out.contains(placeholder) {
                continue;
            }
            let value = value
                .as_deref()
                .ok_or_else(|| WorkerError::MissingPlaceholder(placeholder.to_string()))?;
            out = out.replace(placeholder, value);
        }
        Ok(out)
    }
}

/// The result of argument processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedArgs {
    /// Program to execute.
    pub tool: String,

    /// Arguments for `tool`, wrapper flags removed.
    pub tool_args: Vec<String>,

    pub ephemeral_module_cache: bool,
    pub global_index_store: Option<String>,
    pub target_label: Option<String>,

    /// Value of `-index-store-path`, if the compile writes an index store.
    pub index_store_path: Option<String>,
}

/// Process `args` as described in the module docs.
pub fn process_arguments(
    args: &[String],
    fs: &dyn FileSystem,
    placeholders: &Placeholders,
) -> Result<ProcessedArgs> {
    let expanded = expand_params_files(args, fs)?;

    let mut processed = ProcessedArgs::default();
    let mut remaining = Vec::with_capacity(expanded.len());

    for arg in expanded {
        match arg.strip_prefix(WRAPPED_SWIFT_PREFIX) {
            Some(flag) => apply_wrapped_flag(&mut processed, flag),
            None => remaining.push(placeholders.substitute(&arg)?),
        }
    }

    processed.index_store_path = find_flag_value(&remaining, INDEX_STORE_PATH_FLAG);

    let mut remaining = remaining.into_iter();
    processed.tool = remaining.next().ok_or(WorkerError::NoTool)?;
    processed.tool_args = remaining.collect();

    debug!(
        tool = %processed.tool,
        arg_count = processed.tool_args.len(),
        label = processed.target_label.as_deref().unwrap_or(""),
        "processed wrapper arguments"
    );

    Ok(processed)
}

/// Replace each `@path` argument by the lines of that file.
///
/// Lines inside a params file that start with `@` are kept verbatim.
fn expand_params_files(args: &[String], fs: &dyn FileSystem) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(args.len());

    for arg in args {
        let Some(path) = arg.strip_prefix('@') else {
            out.push(arg.clone());
            continue;
        };

        let path = Path::new(path);
        let contents = fs
            .read_to_string(path)
            .map_err(|err| WorkerError::ParamsFile {
                path: path.to_path_buf(),
                reason: format!("{err:#}"),
            })?;

        let before = out.len();
        out.extend(
            contents
                .lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
        debug!(path = ?path, count = out.len() - before, "expanded params file");
    }

    Ok(out)
}

fn apply_wrapped_flag(processed: &mut ProcessedArgs, flag: &str) {
    match flag.parse::<WrappedSwiftFlag>() {
        Ok(WrappedSwiftFlag::EphemeralModuleCache) => processed.ephemeral_module_cache = true,
        Ok(WrappedSwiftFlag::GlobalIndexStoreImportPath(path)) => {
            processed.global_index_store = Some(path)
        }
        Ok(WrappedSwiftFlag::BazelTargetLabel(label)) => processed.target_label = Some(label),
        Err(msg) => warn!("{msg}; dropping it"),
    }
}

/// Value following the last occurrence of `flag` in `args`.
fn find_flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .rev()
        .find(|pair| pair[0] == flag)
        .map(|pair| pair[1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_argument_is_the_tool() {
        let fs = MockFileSystem::new();
        let processed = process_arguments(
            &strings(&["swiftc", "-c", "main.swift"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap();

        assert_eq!(processed.tool, "swiftc");
        assert_eq!(processed.tool_args, strings(&["-c", "main.swift"]));
        assert!(!processed.ephemeral_module_cache);
    }

    #[test]
    fn params_files_expand_in_place_one_level_deep() {
        let fs = MockFileSystem::new();
        fs.add_params_file("outer.params", &["-module-name", "App", "@inner.params"]);

        let processed = process_arguments(
            &strings(&["swiftc", "@outer.params", "main.swift"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap();

        assert_eq!(
            processed.tool_args,
            strings(&["-module-name", "App", "@inner.params", "main.swift"])
        );
    }

    #[test]
    fn params_file_skips_blank_lines_and_carriage_returns() {
        let fs = MockFileSystem::new();
        fs.add_file("args.params", "-c\r\n\r\nmain.swift\r\n");

        let processed = process_arguments(
            &strings(&["swiftc", "@args.params"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap();

        assert_eq!(processed.tool_args, strings(&["-c", "main.swift"]));
    }

    #[test]
    fn params_file_last_line_without_newline_loses_its_carriage_return() {
        let fs = MockFileSystem::new();
        fs.add_file("args.params", "-c\r\nmain.swift\r");

        let processed = process_arguments(
            &strings(&["swiftc", "@args.params"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap();

        assert_eq!(processed.tool_args, strings(&["-c", "main.swift"]));
    }

    #[test]
    fn missing_params_file_is_an_error() {
        let fs = MockFileSystem::new();
        let err = process_arguments(
            &strings(&["swiftc", "@missing.params"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap_err();

        assert!(matches!(err, WorkerError::ParamsFile { .. }));
    }

    #[test]
    fn wrapped_flags_are_consumed() {
        let fs = MockFileSystem::new();
        let processed = process_arguments(
            &strings(&[
                "swiftc",
                "-Xwrapped-swift=-ephemeral-module-cache",
                "-Xwrapped-swift=-global-index-store-import-path=/global",
                "-Xwrapped-swift=-bazel-target-label=//app:lib",
                "-Xwrapped-swift=-unknown-thing",
                "-index-store-path",
                "/local",
            ]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap();

        assert!(processed.ephemeral_module_cache);
        assert_eq!(processed.global_index_store.as_deref(), Some("/global"));
        assert_eq!(processed.target_label.as_deref(), Some("//app:lib"));
        assert_eq!(processed.index_store_path.as_deref(), Some("/local"));
        assert_eq!(processed.tool_args, strings(&["-index-store-path", "/local"]));
    }

    #[test]
    fn placeholders_are_substituted() {
        let fs = MockFileSystem::new();
        let placeholders = Placeholders {
            developer_dir: Some("/Xcode/Developer".to_string()),
            sdkroot: Some("/SDKs/iPhoneOS.sdk".to_string()),
        };

        let processed = process_arguments(
            &strings(&[
                "swiftc",
                "-sdk",
                "__BAZEL_XCODE_SDKROOT__",
                "-F__BAZEL_XCODE_DEVELOPER_DIR__/Library/Frameworks",
            ]),
            &fs,
            &placeholders,
        )
        .unwrap();

        assert_eq!(
            processed.tool_args,
            strings(&[
                "-sdk",
                "/SDKs/iPhoneOS.sdk",
                "-F/Xcode/Developer/Library/Frameworks",
            ])
        );
    }

    #[test]
    fn missing_placeholder_value_is_an_error() {
        let fs = MockFileSystem::new();
        let err = process_arguments(
            &strings(&["swiftc", "-sdk", "__BAZEL_XCODE_SDKROOT__"]),
            &fs,
            &Placeholders::default(),
        )
        .unwrap_err();

        match err {
            WorkerError::MissingPlaceholder(name) => assert_eq!(name, SDKROOT_PLACEHOLDER),
            other => panic!("expected MissingPlaceholder, got {other:?}"),
        }
    }

    #[test]
    fn empty_argument_list_has_no_tool() {
        let fs = MockFileSystem::new();
        let err = process_arguments(&[], &fs, &Placeholders::default()).unwrap_err();
        assert!(matches!(err, WorkerError::NoTool));
    }

    #[test]
    fn config_placeholders_take_priority() {
        let mut cfg = ConfigFile::default();
        cfg.placeholders.developer_dir = Some("/from/config".to_string());
        cfg.placeholders.sdkroot = Some("/sdk/from/config".to_string());

        let placeholders = Placeholders::resolve(&cfg);

        assert_eq!(placeholders.developer_dir.as_deref(), Some("/from/config"));
        assert_eq!(placeholders.sdkroot.as_deref(), Some("/sdk/from/config"));
    }
}
