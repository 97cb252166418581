//! Metadata extraction.
//!
//! Coerces raw attributes into [`ConcernConfig`] values. Only shape is
//! checked here (keys, value types, strategy tokens); whether the values
//! make sense is the validator's call.

use std::collections::BTreeMap;

use crosscut_foundation::{Error, Result};
use crosscut_model::{Attribute, AttributeValue, DeclarationGraph};

use crate::concern::{AnnotatedEntry, ConcernConfig, ConcernKind, DEFAULT_START, Markers, Strategy};

const LOCK_KEYS: &[&str] = &["lockIdentifier"];
const SEMAPHORE_KEYS: &[&str] = &["semaphoreId", SEMAPHORE_ID_ALIAS, "permits"];
/// Misspelled spelling of `semaphoreId` still found in annotated sources.
const SEMAPHORE_ID_ALIAS: &str = "semophoreId";
const SCHEDULE_KEYS: &[&str] = &["strategy", "interval", "start", "id", "queueSize"];

/// Extracts the configuration of `kind` from an attribute.
///
/// # Errors
///
/// Returns `MalformedConfig` if a required key is missing, a key is
/// unknown, a value has the wrong type, the lock expression is blank, or
/// the strategy token is not recognised.
pub fn extract(kind: ConcernKind, attribute: &Attribute) -> Result<ConcernConfig> {
    let args = Arguments::new(attribute);
    match kind {
        ConcernKind::MutualExclusion => {
            args.reject_unknown(LOCK_KEYS)?;
            let lock_identifier = args.required_str("lockIdentifier")?;
            if lock_identifier.trim().is_empty() {
                return Err(args.malformed("`lockIdentifier` must not be blank"));
            }
            Ok(ConcernConfig::MutualExclusion {
                lock_identifier: lock_identifier.to_string(),
            })
        }
        ConcernKind::CrossSemaphore => {
            args.reject_unknown(SEMAPHORE_KEYS)?;
            Ok(ConcernConfig::CrossSemaphore {
                semaphore_id: match args.optional_str("semaphoreId")? {
                    Some(id) => id,
                    None => args
                        .optional_str(SEMAPHORE_ID_ALIAS)?
                        .ok_or_else(|| args.malformed("missing key `semaphoreId`"))?,
                }
                .to_string(),
                permits: args.optional_int("permits")?.unwrap_or(1),
            })
        }
        ConcernKind::Schedule => {
            args.reject_unknown(SCHEDULE_KEYS)?;
            let strategy = match args.optional_str("strategy")? {
                Some(token) => Strategy::from_token(token).ok_or_else(|| {
                    args.malformed(format!("unknown strategy `{token}`"))
                })?,
                None => Strategy::Skip,
            };
            Ok(ConcernConfig::Schedule {
                strategy,
                interval_ms: args.required_int("interval")?,
                start: args
                    .optional_str("start")?
                    .unwrap_or(DEFAULT_START)
                    .to_string(),
                id: args.required_str("id")?.to_string(),
                queue_size: args.optional_int("queueSize")?.unwrap_or(0),
            })
        }
    }
}

/// Discovers every method marked for `kind` and extracts its configuration.
///
/// Entries come back in discovery order. The first malformed attribute
/// aborts the whole collection.
///
/// # Errors
///
/// Returns `MalformedConfig`, located at the offending method.
pub fn collect_entries<'g, G>(
    graph: &'g G,
    kind: ConcernKind,
    markers: &Markers,
) -> Result<Vec<AnnotatedEntry<'g>>>
where
    G: DeclarationGraph + ?Sized,
{
    let marker = markers.for_kind(kind);
    graph
        .annotated_methods(marker)
        .into_iter()
        .map(|method| {
            let attribute = graph
                .attribute(method.method, marker)
                .ok_or_else(|| Error::malformed(marker, "attribute vanished during lookup"))
                .map_err(|e| e.at_declaration(method.path(), method.location()))?;
            let config = extract(kind, attribute)
                .map_err(|e| e.at_declaration(method.path(), method.location()))?;
            Ok(AnnotatedEntry { method, config })
        })
        .collect()
}

/// Typed accessors over an attribute's arguments.
struct Arguments<'a> {
    name: &'a str,
    values: &'a BTreeMap<String, AttributeValue>,
}

impl<'a> Arguments<'a> {
    fn new(attribute: &'a Attribute) -> Self {
        Self {
            name: &attribute.name,
            values: &attribute.arguments,
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.name, reason)
    }

    fn reject_unknown(&self, known: &[&str]) -> Result<()> {
        match self.values.keys().find(|k| !known.contains(&k.as_str())) {
            Some(key) => Err(self.malformed(format!("unknown key `{key}`"))),
            None => Ok(()),
        }
    }

    fn optional_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(AttributeValue::Str(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.malformed(format!(
                "`{key}` must be a string, got {}",
                other.type_name()
            ))),
        }
    }

    fn required_str(&self, key: &str) -> Result<&'a str> {
        self.optional_str(key)?
            .ok_or_else(|| self.malformed(format!("missing key `{key}`")))
    }

    fn optional_int(&self, key: &str) -> Result<Option<i64>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(AttributeValue::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(self.malformed(format!(
                "`{key}` must be an integer, got {}",
                other.type_name()
            ))),
        }
    }

    fn required_int(&self, key: &str) -> Result<i64> {
        self.optional_int(key)?
            .ok_or_else(|| self.malformed(format!("missing key `{key}`")))
    }
}
