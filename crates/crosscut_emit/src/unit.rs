//! Output units: rendered artifacts paired with their destination.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crosscut_foundation::{Error, ErrorContext, ErrorKind, QualifiedName, Result};
use crosscut_synthesis::DerivedArtifact;

use crate::render::{RenderConfig, render_with_config};

/// File extension of generated sources.
pub const SOURCE_EXTENSION: &str = "java";

/// One file's worth of generated source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputUnit {
    /// The generated type.
    pub name: QualifiedName,
    /// The type it was derived from.
    pub source: QualifiedName,
    /// Path under the output root: package directories, then `Name.java`.
    pub relative_path: PathBuf,
    /// Rendered source text.
    pub contents: String,
}

impl OutputUnit {
    /// Renders an artifact into a unit.
    #[must_use]
    pub fn from_artifact(artifact: &DerivedArtifact, config: &RenderConfig) -> Self {
        Self {
            name: artifact.name.clone(),
            source: artifact.origin.source.clone(),
            relative_path: relative_path(&artifact.name),
            contents: render_with_config(artifact, config),
        }
    }
}

/// Destination of a type under the output root.
///
/// ```
/// use crosscut_emit::unit::relative_path;
/// use crosscut_foundation::QualifiedName;
///
/// let path = relative_path(&QualifiedName::parse("com.acme.Ledger"));
/// assert_eq!(path, std::path::Path::new("com/acme/Ledger.java"));
/// ```
#[must_use]
pub fn relative_path(name: &QualifiedName) -> PathBuf {
    let mut path: PathBuf = name.package_segments().collect();
    path.push(format!("{}.{SOURCE_EXTENSION}", name.simple_name()));
    path
}

/// Renders artifacts into units, rejecting two units for one path.
///
/// Claims persist across calls, so one planner spans a whole round.
#[derive(Debug, Default)]
pub struct UnitPlanner {
    config: RenderConfig,
    claimed: BTreeMap<PathBuf, QualifiedName>,
}

impl UnitPlanner {
    /// Creates a planner rendering with `config`.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            claimed: BTreeMap::new(),
        }
    }

    /// Renders every artifact before returning any unit.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateArtifact` if an artifact's path was already claimed
    /// in this round. No path is claimed when an error is returned.
    pub fn plan(&mut self, artifacts: &[DerivedArtifact]) -> Result<Vec<OutputUnit>> {
        let mut batch: BTreeMap<PathBuf, &QualifiedName> = BTreeMap::new();
        for artifact in artifacts {
            let path = relative_path(&artifact.name);
            if self.claimed.contains_key(&path) || batch.insert(path.clone(), &artifact.name).is_some() {
                return Err(Error::new(ErrorKind::DuplicateArtifact(path.display().to_string()))
                    .with_context(
                    ErrorContext::new().with_declaration(artifact.origin.source.to_string()),
                ));
            }
        }
        let units: Vec<OutputUnit> = artifacts
            .iter()
            .map(|a| OutputUnit::from_artifact(a, &self.config))
            .collect();
        for unit in &units {
            self.claimed.insert(unit.relative_path.clone(), unit.name.clone());
        }
        Ok(units)
    }

    /// Number of paths claimed so far.
    #[must_use]
    pub fn claimed(&self) -> usize {
        self.claimed.len()
    }
}
