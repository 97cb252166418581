//! Runtime collaborator bindings.
//!
//! Generated code calls into three runtime services: a process-wide lock
//! registry, a semaphore store, and a scheduler. Only their names live
//! here; the synthesizers turn them into calls.

use crosscut_foundation::QualifiedName;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::{Expr, Receiver};

/// Fully-qualified class used to turn identifier strings back into UUIDs.
pub const UUID_CLASS: &str = "java.util.UUID";

/// Names of the runtime services generated code depends on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RuntimeBindings {
    /// Class exposing the process-wide lock registry.
    pub lock_registry: QualifiedName,
    /// Static accessor returning the registry instance.
    pub lock_registry_accessor: String,
    /// Class exposing the cross-process semaphore store.
    pub semaphore_store: QualifiedName,
    /// Static accessor returning the default store.
    pub semaphore_store_accessor: String,
    /// Interface a schedule adapter implements.
    pub schedulable: QualifiedName,
    /// Task descriptor type returned by the adapter's factory.
    pub schedule_task: QualifiedName,
    /// Enum holding the overlap strategy constants.
    pub strategy: QualifiedName,
}

impl Default for RuntimeBindings {
    fn default() -> Self {
        Self {
            lock_registry: QualifiedName::parse("io.crosscut.runtime.lock.LockRegistry"),
            lock_registry_accessor: "getInstance".to_string(),
            semaphore_store: QualifiedName::parse("io.crosscut.runtime.semaphore.SemaphoreStore"),
            semaphore_store_accessor: "getDefault".to_string(),
            schedulable: QualifiedName::parse("io.crosscut.runtime.schedule.Schedulable"),
            schedule_task: QualifiedName::parse("io.crosscut.runtime.schedule.ScheduleTask"),
            strategy: QualifiedName::parse("io.crosscut.runtime.schedule.IntersectionStrategy"),
        }
    }
}

impl RuntimeBindings {
    /// `LockRegistry.getInstance()`
    #[must_use]
    pub fn lock_registry(&self) -> Receiver {
        Receiver::Value(Box::new(Expr::static_call(
            &self.lock_registry,
            self.lock_registry_accessor.as_str(),
            Vec::new(),
        )))
    }

    /// `SemaphoreStore.getDefault()`
    #[must_use]
    pub fn semaphore_store(&self) -> Receiver {
        Receiver::Value(Box::new(Expr::static_call(
            &self.semaphore_store,
            self.semaphore_store_accessor.as_str(),
            Vec::new(),
        )))
    }

    /// `IntersectionStrategy.<token>`
    #[must_use]
    pub fn strategy_constant(&self, token: &str) -> Expr {
        Expr::Constant {
            owner: self.strategy.clone(),
            name: token.to_string(),
        }
    }
}

/// `UUID.fromString("<id>")`
#[must_use]
pub fn uuid_literal(id: &Uuid) -> Expr {
    Expr::static_call(
        &QualifiedName::parse(UUID_CLASS),
        "fromString",
        vec![Expr::Str(id.hyphenated().to_string())],
    )
}
