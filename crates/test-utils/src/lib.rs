//! Shared helpers for swift-worker's integration tests.

pub mod builders;
pub mod fake_runner;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// Output goes through the harness's capture, so it only shows up for
/// failing tests or under `--nocapture`. `RUST_LOG` overrides the default
/// of debug for this crate and warn for everything else.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,swift_worker=debug"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}
