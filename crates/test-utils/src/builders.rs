#![allow(dead_code)]

use std::path::Path;

/// Builder for wrapper argument lists, shaped like what Bazel passes.
pub struct ArgsBuilder {
    args: Vec<String>,
}

impl ArgsBuilder {
    /// Start with the tool to execute.
    pub fn new(tool: &str) -> Self {
        Self {
            args: vec![tool.to_string()],
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn params_file(mut self, path: &Path) -> Self {
        self.args.push(format!("@{}", path.display()));
        self
    }

    pub fn ephemeral_module_cache(self) -> Self {
        self.arg("-Xwrapped-swift=-ephemeral-module-cache")
    }

    pub fn global_index_store(self, path: &Path) -> Self {
        let flag = format!(
            "-Xwrapped-swift=-global-index-store-import-path={}",
            path.display()
        );
        self.arg(&flag)
    }

    pub fn index_store_path(self, path: &Path) -> Self {
        let path = path.display().to_string();
        self.args(&["-index-store-path", &path])
    }

    pub fn target_label(self, label: &str) -> Self {
        self.arg(&format!("-Xwrapped-swift=-bazel-target-label={label}"))
    }

    pub fn build(self) -> Vec<String> {
        self.args
    }
}
