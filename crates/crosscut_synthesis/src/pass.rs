//! One concern pass: discover, extract, validate, group, synthesize.
//!
//! A pass is all-or-nothing. Every entry of the kind is validated before
//! anything is synthesized, so a rejected declaration means no artifacts
//! at all for that kind.

use crosscut_foundation::Result;
use crosscut_model::DeclarationGraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::DerivedArtifact;
use crate::bindings::RuntimeBindings;
use crate::concern::{ConcernKind, Markers};
use crate::extract::collect_entries;
use crate::group::{SynthesisGroup, group_entries};
use crate::schedule::ScheduleSynthesizer;
use crate::validate::validate_all;
use crate::wrap::WrapSynthesizer;

/// Knobs shared by every pass of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SynthesisSettings {
    /// Attribute names that select declarations.
    pub markers: Markers,
    /// Runtime services generated code calls into.
    pub bindings: RuntimeBindings,
    /// Run post-actions in a `finally` block.
    pub release_on_failure: bool,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            bindings: RuntimeBindings::default(),
            release_on_failure: true,
        }
    }
}

impl SynthesisSettings {
    /// Sets the marker names.
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Sets the runtime bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: RuntimeBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Sets whether post-actions run on failure.
    #[must_use]
    pub fn with_release_on_failure(mut self, release_on_failure: bool) -> Self {
        self.release_on_failure = release_on_failure;
        self
    }
}

/// Synthesizes one group with the settings' synthesizers.
#[must_use]
pub fn synthesize(group: &SynthesisGroup<'_>, settings: &SynthesisSettings) -> DerivedArtifact {
    match group {
        SynthesisGroup::Wrap(group) => WrapSynthesizer::new(&settings.bindings)
            .with_release_on_failure(settings.release_on_failure)
            .synthesize(group),
        SynthesisGroup::Schedule(group) => {
            ScheduleSynthesizer::new(&settings.bindings).synthesize(group)
        }
    }
}

/// Runs the pass for `kind` and returns its artifacts sorted by name.
///
/// # Errors
///
/// Returns the first extraction, validation, or grouping failure. Nothing
/// is synthesized in that case.
pub fn plan<G>(graph: &G, kind: ConcernKind, settings: &SynthesisSettings) -> Result<Vec<DerivedArtifact>>
where
    G: DeclarationGraph + ?Sized,
{
    let entries = collect_entries(graph, kind, &settings.markers)?;
    if entries.is_empty() {
        debug!(%kind, "no annotated declarations");
        return Ok(Vec::new());
    }
    let valid = validate_all(&entries)?;
    let groups = group_entries(graph, valid)?;
    debug!(%kind, entries = entries.len(), groups = groups.len(), "grouped entries");

    let mut artifacts: Vec<DerivedArtifact> =
        groups.iter().map(|g| synthesize(g, settings)).collect();
    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artifacts)
}
