//! Concern extraction, validation, and synthesis for crosscut.
//!
//! This crate provides:
//! - [`extract`](mod@extract) - Coercion of raw attributes into [`ConcernConfig`]s
//! - [`validate`](mod@validate) - Structural and value rules producing typed [`Concern`]s
//! - [`group`] - Partitioning of valid entries into [`SynthesisGroup`]s
//! - [`WrapSynthesizer`] and [`ScheduleSynthesizer`] - Groups to [`DerivedArtifact`]s
//! - [`plan`] - One whole concern pass over a declaration graph
//!
//! Output is an intermediate representation; turning it into source text
//! is `crosscut_emit`'s job.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod artifact;
pub mod bindings;
pub mod concern;
pub mod extract;
pub mod group;
pub mod pass;
pub mod schedule;
pub mod validate;
pub mod wrap;

pub use artifact::{
    ConstructorSpec, DerivedArtifact, Expr, Member, MethodSpec, Origin, Param, Receiver, Stmt,
    TypeName,
};
pub use bindings::{RuntimeBindings, UUID_CLASS};
pub use concern::{
    AnnotatedEntry, Concern, ConcernConfig, ConcernKind, Markers, ScheduleSpec, StartSpec,
    Strategy, ValidEntry, WrapConcern,
};
pub use extract::{collect_entries, extract};
pub use group::{ScheduleGroup, SynthesisGroup, WrapGroup, WrappedMethod, group_entries};
pub use pass::{SynthesisSettings, plan, synthesize};
pub use schedule::ScheduleSynthesizer;
pub use validate::{MIN_INTERVAL_MS, validate, validate_all};
pub use wrap::WrapSynthesizer;
