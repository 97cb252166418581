//! Source location tracking.
//!
//! `Location` points back into the host program so that every diagnostic
//! names the file, line and column of the offending declaration.

use std::fmt;

/// A position in a host source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Source file path as reported by the host.
    #[cfg_attr(feature = "serde", serde(default))]
    pub file: String,
    /// 1-based line number; 0 when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub line: u32,
    /// 1-based column number; 0 when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Creates a location for declarations the host could not place.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns true if the host supplied no position.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.file.is_empty() && self.line == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = if self.file.is_empty() {
            "<unknown>"
        } else {
            &self.file
        };
        if self.line == 0 {
            write!(f, "{file}")
        } else {
            write!(f, "{file}:{}:{}", self.line, self.column)
        }
    }
}
