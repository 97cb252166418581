//! Rendering and emission of crosscut artifacts.
//!
//! This crate provides:
//! - [`render`](mod@render) - Derived artifacts to deterministic Java source text
//! - [`UnitPlanner`] - Artifacts to [`OutputUnit`]s, with collision detection
//! - [`Emitter`] - Sinks for units: [`FsEmitter`], [`MemoryEmitter`], [`CheckEmitter`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod emitter;
pub mod render;
pub mod unit;

pub use emitter::{CheckEmitter, EmitOutcome, Emitter, FsEmitter, MemoryEmitter};
pub use render::{RenderConfig, render, render_with_config};
pub use unit::{OutputUnit, UnitPlanner, relative_path};
