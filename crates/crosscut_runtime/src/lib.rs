//! Round driver, configuration, and logging for crosscut.
//!
//! This crate provides:
//! - [`Pipeline`] - Runs every concern pass of a round and reports what was emitted
//! - [`GeneratorConfig`] - Settings loaded from `crosscut.toml`
//! - [`logging`] - `tracing` subscriber setup shared with the `crosscut` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod logging;
pub mod pipeline;

pub use config::{DEFAULT_CONFIG_FILE, GeneratorConfig};
pub use pipeline::{EmittedUnit, Pipeline, RoundReport};
