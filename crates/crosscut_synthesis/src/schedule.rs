//! Schedule adapter synthesis.
//!
//! Each scheduled method gets its own adapter type implementing the
//! scheduler's `Schedulable` interface. The adapter is only a factory: its
//! single method builds the task descriptor, and the scheduler does the rest.

use crosscut_foundation::capitalize;
use crosscut_model::Visibility;
use tracing::trace;

use crate::artifact::{DerivedArtifact, Expr, Member, MethodSpec, Origin, Stmt, TypeName};
use crate::bindings::RuntimeBindings;
use crate::concern::ConcernKind;
use crate::group::ScheduleGroup;

/// Name of the factory method the scheduler calls.
pub const FACTORY_METHOD: &str = "initScheduleTask";

/// Builds schedule adapters.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleSynthesizer<'b> {
    bindings: &'b RuntimeBindings,
}

impl<'b> ScheduleSynthesizer<'b> {
    /// Creates a synthesizer targeting the given runtime bindings.
    #[must_use]
    pub const fn new(bindings: &'b RuntimeBindings) -> Self {
        Self { bindings }
    }

    /// Synthesizes the adapter for one scheduled method.
    #[must_use]
    pub fn synthesize(&self, group: &ScheduleGroup<'_>) -> DerivedArtifact {
        let owner = &group.owner.name;
        let name = owner.sibling(format!(
            "{}{}{}",
            owner.simple_name(),
            capitalize(&group.method.name),
            ConcernKind::Schedule.suffix()
        ));
        let spec = &group.spec;

        let mut args = vec![
            self.bindings.strategy_constant(spec.strategy.token()),
            Expr::Int(i64::try_from(spec.interval_ms).unwrap_or(i64::MAX)),
            Expr::Str(spec.start.to_string()),
            Expr::Lambda(Box::new(Expr::static_call(
                owner,
                group.method.name.as_str(),
                Vec::new(),
            ))),
            Expr::Str(spec.id.hyphenated().to_string()),
        ];
        if let Some(capacity) = spec.queue_capacity {
            args.push(Expr::Int(i64::from(capacity.get())));
        }

        let factory = MethodSpec {
            name: FACTORY_METHOD.to_string(),
            visibility: Visibility::Public,
            is_override: true,
            type_params: Vec::new(),
            params: Vec::new(),
            returns: TypeName::Class(self.bindings.schedule_task.clone()),
            throws: Vec::new(),
            body: vec![Stmt::Return(Expr::static_call(
                &self.bindings.schedule_task,
                "of",
                args,
            ))],
        };

        trace!(artifact = %name, strategy = %spec.strategy, "synthesized schedule adapter");
        DerivedArtifact {
            name,
            origin: Origin {
                kind: ConcernKind::Schedule,
                source: owner.clone(),
            },
            doc: vec![format!(
                "Schedules {}.{}() every {} ms.",
                owner.simple_name(),
                group.method.name,
                spec.interval_ms
            )],
            supertype: None,
            interfaces: vec![self.bindings.schedulable.clone()],
            members: vec![Member::Method(factory)],
        }
    }
}
