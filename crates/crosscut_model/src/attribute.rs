//! Raw metadata attached to declarations.
//!
//! An attribute is what the host saw written on a declaration: a marker
//! name plus loosely typed key/value arguments. Turning it into a typed
//! concern configuration is the extractor's job.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single argument value of an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean literal.
    Bool(bool),
    /// An integer literal.
    Int(i64),
    /// A string literal or enum token.
    Str(String),
}

impl AttributeValue {
    /// Returns the type name of this value for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Metadata attached to a declaration.
///
/// Corresponds to an annotation such as
/// `@CrossSemaphore(semaphoreId = "…", permits = 3)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Marker name, simple (`StripedLock`) or qualified (`a.b.StripedLock`).
    pub name: String,
    /// Named arguments, ordered by key.
    #[serde(default)]
    pub arguments: BTreeMap<String, AttributeValue>,
}

impl Attribute {
    /// Creates an attribute with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Builder method to add an argument.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Looks up an argument by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.arguments.get(key)
    }

    /// Returns true if this attribute is the given marker.
    ///
    /// A qualified attribute name matches its simple marker, so
    /// `org.locks.StripedLock` is a `StripedLock`.
    #[must_use]
    pub fn is(&self, marker: &str) -> bool {
        self.name == marker
            || self
                .name
                .rsplit_once('.')
                .is_some_and(|(_, simple)| simple == marker)
            || marker
                .rsplit_once('.')
                .is_some_and(|(_, simple)| simple == self.name)
    }
}
