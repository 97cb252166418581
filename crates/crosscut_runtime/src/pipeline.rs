//! The round driver.
//!
//! A round runs one pass per concern kind, in [`ConcernKind::ALL`] order.
//! Each pass synthesizes and renders all of its artifacts before the first
//! one is emitted, so a failing pass writes nothing. Units written by an
//! earlier pass of the same round stay written.

use std::path::PathBuf;

use crosscut_emit::{CheckEmitter, EmitOutcome, Emitter, FsEmitter, UnitPlanner};
use crosscut_foundation::{QualifiedName, Result};
use crosscut_model::DeclarationGraph;
use crosscut_synthesis::{ConcernKind, SynthesisSettings, plan};
use tracing::{debug, info};

use crate::config::GeneratorConfig;

/// One unit handed to the emitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedUnit {
    /// Concern that produced it.
    pub kind: ConcernKind,
    /// The generated type.
    pub name: QualifiedName,
    /// The type it was derived from.
    pub source: QualifiedName,
    /// Path under the output root.
    pub relative_path: PathBuf,
    /// What the emitter did with it.
    pub outcome: EmitOutcome,
}

/// Summary of a completed round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Every unit, in emission order.
    pub units: Vec<EmittedUnit>,
}

impl RoundReport {
    /// Units with the given outcome.
    pub fn with_outcome(&self, outcome: EmitOutcome) -> impl Iterator<Item = &EmittedUnit> {
        self.units.iter().filter(move |u| u.outcome == outcome)
    }

    /// Number of units written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.with_outcome(EmitOutcome::Written).count()
    }

    /// Number of units already up to date.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.with_outcome(EmitOutcome::Unchanged).count()
    }

    /// Number of units that differ from disk (check mode only).
    #[must_use]
    pub fn stale(&self) -> usize {
        self.with_outcome(EmitOutcome::Stale).count()
    }

    /// Units produced by one concern.
    pub fn for_kind(&self, kind: ConcernKind) -> impl Iterator<Item = &EmittedUnit> {
        self.units.iter().filter(move |u| u.kind == kind)
    }

    fn extend(&mut self, other: Self) {
        self.units.extend(other.units);
    }
}

/// Drives rounds with a fixed configuration.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: GeneratorConfig,
    settings: SynthesisSettings,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Pipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let settings = config.settings();
        Self { config, settings }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs a round, writing into the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns the first extraction, validation, grouping, collision, or
    /// emission failure. The diagnostic names the offending declaration.
    pub fn run_round<G>(&self, graph: &G) -> Result<RoundReport>
    where
        G: DeclarationGraph + ?Sized,
    {
        let mut emitter = FsEmitter::new(&self.config.output_dir);
        self.run_round_with(graph, &mut emitter)
    }

    /// Runs a round without writing, comparing against the output directory.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::run_round`], minus emission failures.
    pub fn check_round<G>(&self, graph: &G) -> Result<RoundReport>
    where
        G: DeclarationGraph + ?Sized,
    {
        let mut checker = CheckEmitter::new(&self.config.output_dir);
        self.run_round_with(graph, &mut checker)
    }

    /// Runs a round into any emitter.
    ///
    /// # Errors
    ///
    /// Same as [`Pipeline::run_round`].
    pub fn run_round_with<G, E>(&self, graph: &G, emitter: &mut E) -> Result<RoundReport>
    where
        G: DeclarationGraph + ?Sized,
        E: Emitter + ?Sized,
    {
        info!(types = graph.types().count(), "starting round");
        let mut planner = UnitPlanner::new(self.config.render_config());
        let mut report = RoundReport::default();

        for kind in ConcernKind::ALL {
            report.extend(self.run_pass(graph, kind, &mut planner, emitter)?);
        }

        info!(
            units = report.units.len(),
            written = report.written(),
            unchanged = report.unchanged(),
            "round complete"
        );
        Ok(report)
    }

    fn run_pass<G, E>(
        &self,
        graph: &G,
        kind: ConcernKind,
        planner: &mut UnitPlanner,
        emitter: &mut E,
    ) -> Result<RoundReport>
    where
        G: DeclarationGraph + ?Sized,
        E: Emitter + ?Sized,
    {
        let artifacts = plan(graph, kind, &self.settings)?;
        let units = planner.plan(&artifacts)?;

        let mut report = RoundReport::default();
        for unit in units {
            let outcome = emitter.emit(&unit)?;
            debug!(%kind, artifact = %unit.name, ?outcome, "emitted unit");
            report.units.push(EmittedUnit {
                kind,
                name: unit.name,
                source: unit.source,
                relative_path: unit.relative_path,
                outcome,
            });
        }
        if !report.units.is_empty() {
            info!(%kind, artifacts = report.units.len(), "concern pass complete");
        }
        Ok(report)
    }
}
