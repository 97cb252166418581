//! Integration tests for Layer 2: Synthesis
//!
//! Tests for validation thresholds, whole concern passes, and the runtime
//! behavior of synthesized wrappers under a small statement interpreter.

mod interpreter;
mod passes;
mod transparency;
