//! Emitters: where output units go.
//!
//! [`FsEmitter`] writes each unit through a temporary file in the target
//! directory and renames it into place, so a destination is either the old
//! content or the new content, never a torn write. [`MemoryEmitter`] keeps
//! units in a map; [`CheckEmitter`] only compares against what is on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crosscut_foundation::{Error, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::unit::OutputUnit;

/// What happened to one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The destination now holds the unit's contents.
    Written,
    /// The destination already held identical bytes and was left alone.
    Unchanged,
    /// The destination differs from the unit; nothing was written.
    Stale,
}

/// A sink for output units.
pub trait Emitter {
    /// Emits one unit.
    ///
    /// # Errors
    ///
    /// Returns `EmissionFailed` if the unit could not be stored.
    fn emit(&mut self, unit: &OutputUnit) -> Result<EmitOutcome>;
}

// =============================================================================
// Filesystem
// =============================================================================

/// Writes units under a root directory.
#[derive(Debug, Clone)]
pub struct FsEmitter {
    root: PathBuf,
}

impl FsEmitter {
    /// Creates an emitter rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Emitter for FsEmitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<EmitOutcome> {
        let path = self.root.join(&unit.relative_path);
        if matches_on_disk(&path, &unit.contents) {
            debug!(path = %path.display(), "unchanged, skipping write");
            return Ok(EmitOutcome::Unchanged);
        }
        write_atomically(&path, unit.contents.as_bytes())?;
        info!(path = %path.display(), artifact = %unit.name, "wrote generated source");
        Ok(EmitOutcome::Written)
    }
}

fn matches_on_disk(path: &Path, contents: &str) -> bool {
    fs::read(path).is_ok_and(|existing| existing == contents.as_bytes())
}

/// Write to a sibling temporary file, flush, then rename over `path`.
///
/// The temporary file is removed if any step fails.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let failed = |e: &dyn std::fmt::Display| Error::emission_failed(path.display().to_string(), e);
    let dir = path
        .parent()
        .ok_or_else(|| failed(&"destination has no parent directory"))?;
    fs::create_dir_all(dir).map_err(|e| failed(&e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| failed(&e))?;
    tmp.write_all(bytes).map_err(|e| failed(&e))?;
    tmp.flush().map_err(|e| failed(&e))?;
    tmp.as_file().sync_all().map_err(|e| failed(&e))?;
    tmp.persist(path).map_err(|e| failed(&e.error))?;
    Ok(())
}

// =============================================================================
// In-memory
// =============================================================================

/// Collects units in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    units: BTreeMap<PathBuf, String>,
}

impl MemoryEmitter {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored at a relative path.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.units.get(path.as_ref()).map(String::as_str)
    }

    /// All stored units, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.units.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }

    /// Number of stored units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<EmitOutcome> {
        match self.units.get(&unit.relative_path) {
            Some(existing) if *existing == unit.contents => Ok(EmitOutcome::Unchanged),
            _ => {
                self.units
                    .insert(unit.relative_path.clone(), unit.contents.clone());
                Ok(EmitOutcome::Written)
            }
        }
    }
}

// =============================================================================
// Check
// =============================================================================

/// Compares units against an output root without writing anything.
#[derive(Debug, Clone)]
pub struct CheckEmitter {
    root: PathBuf,
    stale: Vec<PathBuf>,
}

impl CheckEmitter {
    /// Creates a checker for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stale: Vec::new(),
        }
    }

    /// Relative paths whose on-disk contents differ or are missing.
    #[must_use]
    pub fn stale(&self) -> &[PathBuf] {
        &self.stale
    }
}

impl Emitter for CheckEmitter {
    fn emit(&mut self, unit: &OutputUnit) -> Result<EmitOutcome> {
        if matches_on_disk(&self.root.join(&unit.relative_path), &unit.contents) {
            Ok(EmitOutcome::Unchanged)
        } else {
            debug!(path = %unit.relative_path.display(), "out of date");
            self.stale.push(unit.relative_path.clone());
            Ok(EmitOutcome::Stale)
        }
    }
}
