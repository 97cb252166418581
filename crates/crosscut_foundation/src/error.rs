//! Error types for the crosscut pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every kind is terminal for the concern pass that raised it; the host
//! decides whether the build fails.

use std::fmt;

use thiserror::Error;

use crate::location::Location;

/// Result type for crosscut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for crosscut operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context naming the offending declaration.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches the offending declaration and its location.
    ///
    /// Context already present is kept; only missing fields are filled in.
    #[must_use]
    pub fn at_declaration(mut self, declaration: impl Into<String>, location: &Location) -> Self {
        let context = self.context.take().unwrap_or_default();
        let context = if context.declaration.is_none() {
            context.with_declaration(declaration)
        } else {
            context
        };
        let context = if context.location.is_none() {
            context.with_location(location.clone())
        } else {
            context
        };
        self.context = Some(context);
        self
    }

    /// Creates a malformed attribute error.
    #[must_use]
    pub fn malformed(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedConfig {
            attribute: attribute.into(),
            reason: reason.into(),
        })
    }

    /// Creates an emission failure for the given output path.
    #[must_use]
    pub fn emission_failed(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::EmissionFailed {
            path: path.into(),
            message: message.to_string(),
        })
    }

    /// Creates an index loading error.
    #[must_use]
    pub fn invalid_index(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidIndex(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }

    /// Renders the error together with its context as a single diagnostic.
    ///
    /// ```
    /// use crosscut_foundation::{Error, ErrorContext, ErrorKind, Location};
    ///
    /// let err = Error::new(ErrorKind::FinalMethod).with_context(
    ///     ErrorContext::new()
    ///         .with_declaration("com.acme.Ledger.post")
    ///         .with_location(Location::new("Ledger.java", 12, 5)),
    /// );
    /// assert_eq!(
    ///     err.diagnostic(),
    ///     "error[FinalMethod]: method for overriding must not be final\n  --> Ledger.java:12:5 (com.acme.Ledger.post)"
    /// );
    /// ```
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let mut out = format!("error[{}]: {}", self.kind.code(), self.kind);
        if let Some(context) = &self.context {
            let rendered = context.to_string();
            if !rendered.is_empty() {
                out.push_str("\n  --> ");
                out.push_str(&rendered);
            }
        }
        out
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Attached metadata could not be coerced into a concern configuration.
    #[error("malformed @{attribute}: {reason}")]
    MalformedConfig {
        /// The attribute (marker) name.
        attribute: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A wrapped method is neither public nor protected.
    #[error("method for overriding must be public or protected, found {visibility}")]
    NonOverridableVisibility {
        /// The visibility that was found.
        visibility: String,
    },

    /// A wrapped method is final.
    #[error("method for overriding must not be final")]
    FinalMethod,

    /// A wrapped method is static.
    #[error("method for overriding must not be static")]
    StaticMethod,

    /// The type owning a wrapped method is final.
    #[error("class for overriding must not be final")]
    FinalOwningType,

    /// The type owning a wrapped method is not public.
    #[error("class for overriding must be public")]
    NonPublicOwningType,

    /// Every declared constructor of the owning type is private.
    #[error("class for overriding must have a non-private constructor")]
    NoAccessibleConstructor,

    /// Semaphore permit count below one.
    #[error("permits for a cross semaphore must be at least 1, got {0}")]
    InvalidPermitCount(i64),

    /// Semaphore identifier is not a UUID.
    #[error("semaphore id must be a UUID, got {0:?}")]
    InvalidSemaphoreId(String),

    /// A scheduled method declares parameters.
    #[error("scheduled method must not have parameters, found {0}")]
    UnexpectedParameters(usize),

    /// A scheduled method is not both static and public.
    #[error("scheduled method must be static and public")]
    InvalidScheduleMethodModifiers,

    /// Schedule interval at or below the 100ms floor.
    #[error("interval between task runs must be greater than 100ms, got {0}ms")]
    IntervalTooSmall(i64),

    /// Queueing strategy without a positive queue size.
    #[error("queue size for strategy PUT_TO_QUEUE must be positive, got {0}")]
    QueueSizeRequired(i64),

    /// Scheduled task identifier is not a UUID.
    #[error("task id must be a UUID, got {0:?}")]
    InvalidTaskId(String),

    /// Start specification is neither `DEFAULT` nor a `dd-MM-yyyyTHH:mm:ss` date-time.
    #[error("start must be DEFAULT or match dd-MM-yyyyTHH:mm:ss, got {0:?}")]
    InvalidStartTime(String),

    /// The owning type of a wrapped method is not in the declaration graph.
    #[error("owning type {0} cannot be resolved")]
    UnresolvedOwner(String),

    /// Two artifacts in one round map to the same output unit.
    #[error("more than one artifact would be written to {0}")]
    DuplicateArtifact(String),

    /// Writing an output unit failed.
    #[error("failed to emit {path}: {message}")]
    EmissionFailed {
        /// The output path being written.
        path: String,
        /// The underlying I/O failure.
        message: String,
    },

    /// The declaration index could not be loaded.
    #[error("invalid declaration index: {0}")]
    InvalidIndex(String),

    /// Generator configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ErrorKind {
    /// Stable name of this kind, used as the diagnostic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedConfig { .. } => "MalformedConfig",
            Self::NonOverridableVisibility { .. } => "NonOverridableVisibility",
            Self::FinalMethod => "FinalMethod",
            Self::StaticMethod => "StaticMethod",
            Self::FinalOwningType => "FinalOwningType",
            Self::NonPublicOwningType => "NonPublicOwningType",
            Self::NoAccessibleConstructor => "NoAccessibleConstructor",
            Self::InvalidPermitCount(_) => "InvalidPermitCount",
            Self::InvalidSemaphoreId(_) => "InvalidSemaphoreId",
            Self::UnexpectedParameters(_) => "UnexpectedParameters",
            Self::InvalidScheduleMethodModifiers => "InvalidScheduleMethodModifiers",
            Self::IntervalTooSmall(_) => "IntervalTooSmall",
            Self::QueueSizeRequired(_) => "QueueSizeRequired",
            Self::InvalidTaskId(_) => "InvalidTaskId",
            Self::InvalidStartTime(_) => "InvalidStartTime",
            Self::UnresolvedOwner(_) => "UnresolvedOwner",
            Self::DuplicateArtifact(_) => "DuplicateArtifact",
            Self::EmissionFailed { .. } => "EmissionFailed",
            Self::InvalidIndex(_) => "InvalidIndex",
            Self::InvalidConfig(_) => "InvalidConfig",
        }
    }

    /// Returns true for the structural and per-concern validation kinds.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NonOverridableVisibility { .. }
                | Self::FinalMethod
                | Self::StaticMethod
                | Self::FinalOwningType
                | Self::NonPublicOwningType
                | Self::NoAccessibleConstructor
                | Self::InvalidPermitCount(_)
                | Self::InvalidSemaphoreId(_)
                | Self::UnexpectedParameters(_)
                | Self::InvalidScheduleMethodModifiers
                | Self::IntervalTooSmall(_)
                | Self::QueueSizeRequired(_)
                | Self::InvalidTaskId(_)
                | Self::InvalidStartTime(_)
        )
    }
}

/// Context about which declaration caused an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Dotted path of the offending declaration (`pkg.Type.method`).
    pub declaration: Option<String>,
    /// Where the declaration lives in the host program.
    pub location: Option<Location>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offending declaration.
    #[must_use]
    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = Some(declaration.into());
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.location, &self.declaration) {
            (Some(location), Some(decl)) => write!(f, "{location} ({decl})"),
            (Some(location), None) => write!(f, "{location}"),
            (None, Some(decl)) => write!(f, "{decl}"),
            (None, None) => Ok(()),
        }
    }
}
