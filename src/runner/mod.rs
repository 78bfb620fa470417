// src/runner/mod.rs

//! The Swift compile runner.
//!
//! - [`args`] turns the raw argument list into a tool invocation (params
//!   files, wrapper flags, Xcode placeholders).
//! - [`index_import`] runs `index-import` after a successful compile.
//! - [`swift_runner`] ties both together behind the [`crate::compile::Runner`]
//!   trait.

pub mod args;
pub mod index_import;
pub mod swift_runner;

pub use args::{Placeholders, ProcessedArgs, process_arguments};
pub use swift_runner::SwiftRunner;
