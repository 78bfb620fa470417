// src/config/mod.rs

//! Optional configuration file for swift-worker.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: reading a config file from disk.
//! - `validate.rs`: rejecting blank values.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, PlaceholderSection, RawConfigFile, RunnerSection};
