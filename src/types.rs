use std::str::FromStr;

/// Prefix marking an argument as meant for the wrapper rather than the tool.
pub const WRAPPED_SWIFT_PREFIX: &str = "-Xwrapped-swift=";

/// Bazel placeholder for the active Xcode developer directory.
pub const DEVELOPER_DIR_PLACEHOLDER: &str = "__BAZEL_XCODE_DEVELOPER_DIR__";

/// Bazel placeholder for the active SDK root.
pub const SDKROOT_PLACEHOLDER: &str = "__BAZEL_XCODE_SDKROOT__";

/// Exit code reported for a child that ended without one (e.g. killed by a
/// signal).
pub const SIGNALLED_EXIT_CODE: i32 = -1;

/// Exit code for failures inside the wrapper itself.
pub const WRAPPER_FAILURE_EXIT_CODE: i32 = 1;

/// A wrapper-only flag, passed as `-Xwrapped-swift=<flag>`.
///
/// - `EphemeralModuleCache`: compile against a fresh temporary module cache.
/// - `GlobalIndexStoreImportPath`: after a successful compile, import the
///   action's index store into this global store.
/// - `BazelTargetLabel`: label of the target being built; log context only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrappedSwiftFlag {
    EphemeralModuleCache,
    GlobalIndexStoreImportPath(String),
    BazelTargetLabel(String),
}

impl FromStr for WrappedSwiftFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-ephemeral-module-cache" {
            return Ok(WrappedSwiftFlag::EphemeralModuleCache);
        }
        if let Some(path) = s.strip_prefix("-global-index-store-import-path=") {
            if path.is_empty() {
                return Err("-global-index-store-import-path requires a value".to_string());
            }
            return Ok(WrappedSwiftFlag::GlobalIndexStoreImportPath(path.to_string()));
        }
        if let Some(label) = s.strip_prefix("-bazel-target-label=") {
            return Ok(WrappedSwiftFlag::BazelTargetLabel(label.to_string()));
        }
        Err(format!("unknown wrapped swift flag: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_flags() {
        assert_eq!(
            "-ephemeral-module-cache".parse(),
            Ok(WrappedSwiftFlag::EphemeralModuleCache)
        );
        assert_eq!(
            "-global-index-store-import-path=/tmp/global".parse(),
            Ok(WrappedSwiftFlag::GlobalIndexStoreImportPath("/tmp/global".to_string()))
        );
        assert_eq!(
            "-bazel-target-label=//app:lib".parse(),
            Ok(WrappedSwiftFlag::BazelTargetLabel("//app:lib".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_and_empty_flags() {
        assert!("-frobnicate".parse::<WrappedSwiftFlag>().is_err());
        assert!(
            "-global-index-store-import-path="
                .parse::<WrappedSwiftFlag>()
                .is_err()
        );
    }
}
