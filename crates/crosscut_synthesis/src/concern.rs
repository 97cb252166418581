//! Concern kinds and their configurations.
//!
//! A [`ConcernConfig`] is what the extractor coerced out of an attribute.
//! A [`Concern`] is the same data after validation: UUIDs parsed, counts
//! range-checked, start times resolved. Synthesizers only see the latter.

use std::fmt;
use std::num::NonZeroU32;

use chrono::NaiveDateTime;
use crosscut_model::MethodRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `strftime` rendering of the `dd-MM-yyyyTHH:mm:ss` start pattern.
pub const START_PATTERN: &str = "%d-%m-%YT%H:%M:%S";

/// Start token meaning "let the scheduler decide".
pub const DEFAULT_START: &str = "DEFAULT";

// =============================================================================
// Concern Kinds
// =============================================================================

/// One of the three supported cross-cutting behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConcernKind {
    /// Named mutual-exclusion lock around a method.
    MutualExclusion,
    /// Cross-process semaphore permit around a method.
    CrossSemaphore,
    /// Periodic execution of a static method.
    Schedule,
}

impl ConcernKind {
    /// All kinds, in the order a round processes them.
    pub const ALL: [Self; 3] = [Self::MutualExclusion, Self::CrossSemaphore, Self::Schedule];

    /// Suffix appended to the owning type's name for derived artifacts.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::MutualExclusion => "StripedLockProxy",
            Self::CrossSemaphore => "CrossSemaphoreProxy",
            Self::Schedule => "ScheduledInit",
        }
    }

    /// Returns true for the kinds synthesized as overriding subclasses.
    #[must_use]
    pub const fn is_wrapping(self) -> bool {
        matches!(self, Self::MutualExclusion | Self::CrossSemaphore)
    }
}

impl fmt::Display for ConcernKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MutualExclusion => "mutual-exclusion",
            Self::CrossSemaphore => "cross-semaphore",
            Self::Schedule => "schedule",
        })
    }
}

/// Attribute names that mark a declaration for each concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Markers {
    /// Marker for [`ConcernKind::MutualExclusion`].
    pub striped_lock: String,
    /// Marker for [`ConcernKind::CrossSemaphore`].
    pub cross_semaphore: String,
    /// Marker for [`ConcernKind::Schedule`].
    pub scheduled: String,
}

impl Markers {
    /// The marker configured for a concern.
    #[must_use]
    pub fn for_kind(&self, kind: ConcernKind) -> &str {
        match kind {
            ConcernKind::MutualExclusion => &self.striped_lock,
            ConcernKind::CrossSemaphore => &self.cross_semaphore,
            ConcernKind::Schedule => &self.scheduled,
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            striped_lock: "StripedLock".to_string(),
            cross_semaphore: "CrossSemaphore".to_string(),
            scheduled: "Scheduled".to_string(),
        }
    }
}

// =============================================================================
// Scheduling Strategy
// =============================================================================

/// What the scheduler does when a run is due while the previous one is still going.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Drop the overlapping invocation.
    Skip,
    /// Buffer overlapping invocations up to the queue size.
    PutToQueue,
}

impl Strategy {
    /// The enum constant name in generated code.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::PutToQueue => "PUT_TO_QUEUE",
        }
    }

    /// Parses a strategy token, accepting a qualified `Enum.CONSTANT` form.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let constant = token.rsplit('.').next().unwrap_or(token);
        match constant {
            "SKIP" => Some(Self::Skip),
            "PUT_TO_QUEUE" => Some(Self::PutToQueue),
            _ => None,
        }
    }

    /// Returns true if the strategy needs a queue capacity.
    #[must_use]
    pub const fn requires_queue(self) -> bool {
        matches!(self, Self::PutToQueue)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =============================================================================
// Extracted Configuration
// =============================================================================

/// Typed configuration coerced from an attribute, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConcernConfig {
    /// Configuration of a mutual-exclusion concern.
    MutualExclusion {
        /// Expression producing the lock key in generated code.
        lock_identifier: String,
    },
    /// Configuration of a cross-semaphore concern.
    CrossSemaphore {
        /// UUID-shaped semaphore identifier.
        semaphore_id: String,
        /// Total (and initially available) permits.
        permits: i64,
    },
    /// Configuration of a schedule concern.
    Schedule {
        /// Overlap strategy.
        strategy: Strategy,
        /// Milliseconds between runs.
        interval_ms: i64,
        /// `DEFAULT` or a `dd-MM-yyyyTHH:mm:ss` date-time.
        start: String,
        /// UUID-shaped task identifier.
        id: String,
        /// Queue capacity, meaningful for [`Strategy::PutToQueue`].
        queue_size: i64,
    },
}

impl ConcernConfig {
    /// The concern this configuration belongs to.
    #[must_use]
    pub const fn kind(&self) -> ConcernKind {
        match self {
            Self::MutualExclusion { .. } => ConcernKind::MutualExclusion,
            Self::CrossSemaphore { .. } => ConcernKind::CrossSemaphore,
            Self::Schedule { .. } => ConcernKind::Schedule,
        }
    }
}

/// A discovered declaration paired with its extracted configuration.
#[derive(Clone, Debug)]
pub struct AnnotatedEntry<'a> {
    /// The annotated method and its owner.
    pub method: MethodRef<'a>,
    /// The extracted configuration.
    pub config: ConcernConfig,
}

impl AnnotatedEntry<'_> {
    /// The concern this entry belongs to.
    #[must_use]
    pub const fn kind(&self) -> ConcernKind {
        self.config.kind()
    }
}

// =============================================================================
// Validated Configuration
// =============================================================================

/// When the first scheduled run happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartSpec {
    /// Scheduler default.
    Default,
    /// A fixed local date-time.
    At(NaiveDateTime),
}

impl fmt::Display for StartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(DEFAULT_START),
            Self::At(at) => write!(f, "{}", at.format(START_PATTERN)),
        }
    }
}

/// A validated schedule configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleSpec {
    /// Overlap strategy.
    pub strategy: Strategy,
    /// Milliseconds between runs, always above 100.
    pub interval_ms: u64,
    /// First run.
    pub start: StartSpec,
    /// Task identifier.
    pub id: Uuid,
    /// Queue capacity; present exactly when the strategy queues.
    pub queue_capacity: Option<NonZeroU32>,
}

/// A validated wrapping concern: what runs around the wrapped call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WrapConcern {
    /// Lock `lock_identifier` around the call.
    MutualExclusion {
        /// Expression producing the lock key.
        lock_identifier: String,
    },
    /// Hold one permit of `semaphore_id` around the call.
    CrossSemaphore {
        /// Semaphore identifier.
        semaphore_id: Uuid,
        /// Total permits the semaphore is created with.
        permits: NonZeroU32,
    },
}

impl WrapConcern {
    /// The kind of this concern.
    #[must_use]
    pub const fn kind(&self) -> ConcernKind {
        match self {
            Self::MutualExclusion { .. } => ConcernKind::MutualExclusion,
            Self::CrossSemaphore { .. } => ConcernKind::CrossSemaphore,
        }
    }

    /// Identifier tokens in expressions spliced verbatim into the override.
    #[must_use]
    pub fn referenced_identifiers(&self) -> Vec<&str> {
        match self {
            Self::MutualExclusion { lock_identifier } => lock_identifier
                .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                .filter(|token| !token.is_empty())
                .collect(),
            Self::CrossSemaphore { .. } => Vec::new(),
        }
    }
}

/// A validated concern, ready for synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Concern {
    /// Wrap the method in an overriding subclass.
    Wrap(WrapConcern),
    /// Register the method with the scheduler.
    Schedule(ScheduleSpec),
}

impl Concern {
    /// The kind of this concern.
    #[must_use]
    pub const fn kind(&self) -> ConcernKind {
        match self {
            Self::Wrap(wrap) => wrap.kind(),
            Self::Schedule(_) => ConcernKind::Schedule,
        }
    }
}

/// An entry that passed validation.
#[derive(Clone, Debug)]
pub struct ValidEntry<'a> {
    /// The annotated method and its owner.
    pub method: MethodRef<'a>,
    /// The validated concern.
    pub concern: Concern,
}
