//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, diagnostics, locations, and qualified names.

mod errors;
mod names;
