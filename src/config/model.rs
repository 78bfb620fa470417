// src/config/model.rs

use serde::Deserialize;

/// Configuration as read from a TOML file.
///
/// ```toml
/// [runner]
/// index_import_path = "/opt/tools/index-import"
///
/// [placeholders]
/// developer_dir = "/Applications/Xcode.app/Contents/Developer"
/// sdkroot = "/Applications/Xcode.app/Contents/Developer/Platforms/MacOSX.platform/Developer/SDKs/MacOSX.sdk"
/// ```
///
/// Both sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub placeholders: PlaceholderSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Default path to the `index-import` tool, used when the CLI flag is
    /// not given.
    #[serde(default)]
    pub index_import_path: Option<String>,
}

/// `[placeholders]` section.
///
/// Overrides for the `DEVELOPER_DIR` / `SDKROOT` environment variables when
/// substituting Bazel's Xcode placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholderSection {
    #[serde(default)]
    pub developer_dir: Option<String>,

    #[serde(default)]
    pub sdkroot: Option<String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub runner: RunnerSection,
    pub placeholders: PlaceholderSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(runner: RunnerSection, placeholders: PlaceholderSection) -> Self {
        Self {
            runner,
            placeholders,
        }
    }
}
