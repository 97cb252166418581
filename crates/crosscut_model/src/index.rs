//! In-memory syntax index.
//!
//! A `SyntaxIndex` is the declaration graph of one compilation round,
//! loaded from the JSON the host's front end writes out:
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "com.acme.Account",
//!       "visibility": "public",
//!       "constructors": [{ "visibility": "public", "parameters": [{ "name": "id", "type": "String" }] }],
//!       "methods": [{
//!         "name": "withdraw",
//!         "visibility": "public",
//!         "parameters": [{ "name": "amount", "type": "long" }],
//!         "returns": "boolean",
//!         "attributes": [{ "name": "StripedLock", "arguments": { "lockIdentifier": "id" } }]
//!       }]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crosscut_foundation::{Error, QualifiedName, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::declaration::TypeDecl;
use crate::graph::DeclarationGraph;

/// On-disk shape of an index file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    #[serde(default)]
    types: Vec<TypeDecl>,
}

/// Declarations of one round, indexed by qualified type name.
#[derive(Debug, Clone, Default)]
pub struct SyntaxIndex {
    types: Vec<TypeDecl>,
    by_name: HashMap<QualifiedName, usize>,
}

impl SyntaxIndex {
    /// Builds an index, keeping `types` in the given (discovery) order.
    ///
    /// # Errors
    ///
    /// Returns an error if two types share a qualified name, since a
    /// declaration must resolve to a unique location.
    pub fn new(types: Vec<TypeDecl>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(types.len());
        for (i, ty) in types.iter().enumerate() {
            if by_name.insert(ty.name.clone(), i).is_some() {
                return Err(Error::invalid_index(format!(
                    "type {} is declared more than once",
                    ty.name
                )));
            }
        }
        Ok(Self { types, by_name })
    }

    /// Parses an index from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or declares a type twice.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: IndexFile =
            serde_json::from_str(json).map_err(|e| Error::invalid_index(e.to_string()))?;
        Self::new(file.types)
    }

    /// Loads an index from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid index.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            Error::invalid_index(format!("failed to read '{}': {e}", path.display()))
        })?;
        let index = Self::from_json(&json).map_err(|e| match e.kind {
            crosscut_foundation::ErrorKind::InvalidIndex(msg) => {
                Error::invalid_index(format!("{}: {msg}", path.display()))
            }
            _ => e,
        })?;
        debug!(path = %path.display(), types = index.len(), "loaded syntax index");
        Ok(index)
    }

    /// Serializes the index back to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let file = IndexFile {
            types: self.types.clone(),
        };
        serde_json::to_string_pretty(&file).map_err(|e| Error::invalid_index(e.to_string()))
    }

    /// Number of types in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the index holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl DeclarationGraph for SyntaxIndex {
    fn types(&self) -> Box<dyn Iterator<Item = &TypeDecl> + '_> {
        Box::new(self.types.iter())
    }

    fn type_decl(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.by_name.get(name).map(|&i| &self.types[i])
    }
}
