//! Package-qualified type names.

use std::fmt;

/// A type name split into its package and simple name.
///
/// `com.acme.Ledger` has package `com.acme` and simple name `Ledger`.
/// Types in the default package have an empty package.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct QualifiedName {
    package: String,
    name: String,
}

impl QualifiedName {
    /// Creates a name from an explicit package and simple name.
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Splits a dotted name at its last segment.
    ///
    /// ```
    /// use crosscut_foundation::QualifiedName;
    ///
    /// let name = QualifiedName::parse("com.acme.Ledger");
    /// assert_eq!(name.package(), "com.acme");
    /// assert_eq!(name.simple_name(), "Ledger");
    ///
    /// let bare = QualifiedName::parse("Ledger");
    /// assert_eq!(bare.package(), "");
    /// ```
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        match dotted.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", dotted),
        }
    }

    /// The package, empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The unqualified type name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Returns true if the type lives in the default package.
    #[must_use]
    pub fn in_default_package(&self) -> bool {
        self.package.is_empty()
    }

    /// A sibling type in the same package.
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(self.package.clone(), name)
    }

    /// Package segments, for mapping onto output directories.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split('.').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

impl From<String> for QualifiedName {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&str> for QualifiedName {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

/// Upper-cases the first character of an identifier.
///
/// ```
/// assert_eq!(crosscut_foundation::capitalize("refresh"), "Refresh");
/// assert_eq!(crosscut_foundation::capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
