//! Validation of annotated entries.
//!
//! Structural rules on the declaration come first, then the concern's own
//! rules. The first violated rule is reported; nothing is accumulated.

use std::num::NonZeroU32;

use chrono::NaiveDateTime;
use crosscut_foundation::{Error, ErrorKind, Result};
use crosscut_model::MethodRef;
use uuid::Uuid;

use crate::concern::{
    AnnotatedEntry, Concern, ConcernConfig, DEFAULT_START, START_PATTERN, ScheduleSpec, StartSpec,
    ValidEntry, WrapConcern,
};

/// Smallest interval that is rejected; anything above it is accepted.
pub const MIN_INTERVAL_MS: i64 = 100;

/// Validates one entry and produces its typed concern.
///
/// # Errors
///
/// Returns the kind of the first violated rule, located at the entry's
/// method.
pub fn validate<'a>(entry: &AnnotatedEntry<'a>) -> Result<ValidEntry<'a>> {
    let method = entry.method;
    let concern = check(&method, &entry.config)
        .map_err(|kind| Error::new(kind).at_declaration(method.path(), method.location()))?;
    Ok(ValidEntry { method, concern })
}

/// Validates every entry, stopping at the first failure.
///
/// # Errors
///
/// Returns the first entry's validation error, in discovery order.
pub fn validate_all<'a>(entries: &[AnnotatedEntry<'a>]) -> Result<Vec<ValidEntry<'a>>> {
    entries.iter().map(validate).collect()
}

fn check(method: &MethodRef<'_>, config: &ConcernConfig) -> std::result::Result<Concern, ErrorKind> {
    match config {
        ConcernConfig::MutualExclusion { lock_identifier } => {
            check_overridable(method)?;
            Ok(Concern::Wrap(WrapConcern::MutualExclusion {
                lock_identifier: lock_identifier.clone(),
            }))
        }
        ConcernConfig::CrossSemaphore {
            semaphore_id,
            permits,
        } => {
            check_overridable(method)?;
            let permits = positive_u32(*permits).ok_or(ErrorKind::InvalidPermitCount(*permits))?;
            let semaphore_id = Uuid::parse_str(semaphore_id)
                .map_err(|_| ErrorKind::InvalidSemaphoreId(semaphore_id.clone()))?;
            Ok(Concern::Wrap(WrapConcern::CrossSemaphore {
                semaphore_id,
                permits,
            }))
        }
        ConcernConfig::Schedule {
            strategy,
            interval_ms,
            start,
            id,
            queue_size,
        } => {
            check_schedulable(method)?;
            if *interval_ms <= MIN_INTERVAL_MS {
                return Err(ErrorKind::IntervalTooSmall(*interval_ms));
            }
            let interval_ms = u64::try_from(*interval_ms)
                .map_err(|_| ErrorKind::IntervalTooSmall(*interval_ms))?;
            let queue_capacity = if strategy.requires_queue() {
                Some(positive_u32(*queue_size).ok_or(ErrorKind::QueueSizeRequired(*queue_size))?)
            } else {
                None
            };
            let id = Uuid::parse_str(id).map_err(|_| ErrorKind::InvalidTaskId(id.clone()))?;
            let start = parse_start(start).ok_or_else(|| ErrorKind::InvalidStartTime(start.clone()))?;
            Ok(Concern::Schedule(ScheduleSpec {
                strategy: *strategy,
                interval_ms,
                start,
                id,
                queue_capacity,
            }))
        }
    }
}

/// Rules shared by the wrapping concerns: the method must be overridable
/// from a subclass and the class must be extensible.
fn check_overridable(method: &MethodRef<'_>) -> std::result::Result<(), ErrorKind> {
    let decl = method.method;
    if !decl.visibility.is_overridable() {
        return Err(ErrorKind::NonOverridableVisibility {
            visibility: decl.visibility.to_string(),
        });
    }
    if decl.modifiers.is_final() {
        return Err(ErrorKind::FinalMethod);
    }
    if decl.modifiers.is_static() {
        return Err(ErrorKind::StaticMethod);
    }
    let owner = method.owner;
    if owner.modifiers.is_final() {
        return Err(ErrorKind::FinalOwningType);
    }
    if owner.visibility != crosscut_model::Visibility::Public {
        return Err(ErrorKind::NonPublicOwningType);
    }
    if !owner.constructors.is_empty()
        && owner
            .constructors
            .iter()
            .all(|c| c.visibility == crosscut_model::Visibility::Private)
    {
        return Err(ErrorKind::NoAccessibleConstructor);
    }
    Ok(())
}

fn check_schedulable(method: &MethodRef<'_>) -> std::result::Result<(), ErrorKind> {
    let decl = method.method;
    if !decl.parameters.is_empty() {
        return Err(ErrorKind::UnexpectedParameters(decl.parameters.len()));
    }
    if !decl.modifiers.is_static() || decl.visibility != crosscut_model::Visibility::Public {
        return Err(ErrorKind::InvalidScheduleMethodModifiers);
    }
    Ok(())
}

/// Accepts `1..=i32::MAX`, the range of a Java `int`.
fn positive_u32(n: i64) -> Option<NonZeroU32> {
    if n > i64::from(i32::MAX) {
        return None;
    }
    u32::try_from(n).ok().and_then(NonZeroU32::new)
}

fn parse_start(start: &str) -> Option<StartSpec> {
    if start == DEFAULT_START {
        return Some(StartSpec::Default);
    }
    NaiveDateTime::parse_from_str(start, START_PATTERN)
        .ok()
        .map(StartSpec::At)
}
