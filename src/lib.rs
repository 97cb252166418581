//! crosscut - Compile-time synthesis of cross-cutting wrappers
//!
//! This crate re-exports all layers of the crosscut generator for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: crosscut_runtime    - Round driver, configuration, logging, CLI
//! Layer 3: crosscut_emit       - Java rendering, output units, atomic writes
//! Layer 2: crosscut_synthesis  - Extraction, validation, grouping, synthesis
//! Layer 1: crosscut_model      - Declarations, attributes, syntax index
//! Layer 0: crosscut_foundation - Errors, locations, qualified names
//! ```

pub use crosscut_emit as emit;
pub use crosscut_foundation as foundation;
pub use crosscut_model as model;
pub use crosscut_runtime as runtime;
pub use crosscut_synthesis as synthesis;
