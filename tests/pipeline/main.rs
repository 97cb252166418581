//! Integration tests for Layer 4: Runtime
//!
//! Whole rounds from a syntax index to files on disk.

mod config;
mod rounds;

use std::path::{Path, PathBuf};

use crosscut_model::SyntaxIndex;

/// The bank fixture index.
pub fn bank() -> SyntaxIndex {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bank.json");
    SyntaxIndex::load(path).unwrap()
}

/// Reads a generated file under `root`.
pub fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative)).unwrap()
}
