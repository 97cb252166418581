//! Declaration type definitions.
//!
//! Contains the typed view of host types, constructors and methods that
//! the pipeline inspects. All types deserialize from the syntax index
//! format and expose `with_*` builders for constructing graphs in code.

use std::collections::BTreeSet;
use std::fmt;

use crosscut_foundation::{Location, QualifiedName};
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

// =============================================================================
// Visibility and Modifiers
// =============================================================================

/// Access level of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible to subclasses and the package.
    Protected,
    /// Visible within the package (no keyword).
    #[default]
    Package,
    /// Visible within the declaring type only.
    Private,
}

impl Visibility {
    /// The source keyword for this level, `None` for package access.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Package => None,
            Self::Private => Some("private"),
        }
    }

    /// Returns true if a subclass in another package can override at this level.
    #[must_use]
    pub const fn is_overridable(self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("package-private"))
    }
}

/// A non-access modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// `static`
    Static,
    /// `final`
    Final,
    /// `abstract`
    Abstract,
    /// `synchronized`
    Synchronized,
}

/// The set of non-access modifiers on a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    /// Creates an empty modifier set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a modifier.
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.0.insert(modifier);
        self
    }

    /// Returns true if the modifier is present.
    #[must_use]
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Returns true if `static` is present.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    /// Returns true if `final` is present.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    /// Returns true if `abstract` is present.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.contains(Modifier::Abstract)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Types and Parameters
// =============================================================================

/// A type as written in source (`long`, `java.util.List<String>`, `void`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Creates a type reference from its source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The "no value" return type.
    #[must_use]
    pub fn void() -> Self {
        Self("void".to_string())
    }

    /// Returns true for the "no value" return type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }

    /// The source text of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::void()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TypeRef {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// A formal parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

// =============================================================================
// Constructor Declaration
// =============================================================================

/// A constructor of a host type.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstructorDecl {
    /// Access level.
    #[serde(default)]
    pub visibility: Visibility,
    /// Formal parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared exceptions.
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    /// Source location.
    #[serde(default)]
    pub location: Location,
}

impl ConstructorDecl {
    /// Creates a package-private, parameterless constructor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Builder method to append a declared exception.
    #[must_use]
    pub fn with_throws(mut self, ty: impl Into<TypeRef>) -> Self {
        self.throws.push(ty.into());
        self
    }
}

// =============================================================================
// Method Declaration
// =============================================================================

/// A method of a host type.
///
/// Corresponds to:
/// ```java
/// @StripedLock(lockIdentifier = "accountId")
/// public boolean transfer(long amount) throws LedgerException { ... }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Simple method name.
    pub name: String,
    /// Access level.
    #[serde(default)]
    pub visibility: Visibility,
    /// Non-access modifiers.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Type variables with their bounds, as written: `T`, `K extends Comparable<K>`.
    #[serde(default, rename = "typeParameters")]
    pub type_parameters: Vec<String>,
    /// Formal parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type, `void` when omitted.
    #[serde(default)]
    pub returns: TypeRef,
    /// Declared exceptions.
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    /// Attached metadata.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Source location.
    #[serde(default)]
    pub location: Location,
}

impl MethodDecl {
    /// Creates a package-private `void` method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Package,
            modifiers: Modifiers::new(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            returns: TypeRef::void(),
            throws: Vec::new(),
            attributes: Vec::new(),
            location: Location::unknown(),
        }
    }

    /// Builder method to set the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder method to add a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = self.modifiers.with(modifier);
        self
    }

    /// Builder method to declare a type variable.
    #[must_use]
    pub fn with_type_param(mut self, param: impl Into<String>) -> Self {
        self.type_parameters.push(param.into());
        self
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Builder method to set the return type.
    #[must_use]
    pub fn with_returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.returns = ty.into();
        self
    }

    /// Builder method to append a declared exception.
    #[must_use]
    pub fn with_throws(mut self, ty: impl Into<TypeRef>) -> Self {
        self.throws.push(ty.into());
        self
    }

    /// Builder method to attach metadata.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Builder method to set the source location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// The first attached attribute matching a marker.
    #[must_use]
    pub fn attribute(&self, marker: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(marker))
    }

    /// Key that orders overloads deterministically: name, then parameter types.
    #[must_use]
    pub fn signature_key(&self) -> (&str, Vec<&str>) {
        (
            self.name.as_str(),
            self.parameters.iter().map(|p| p.ty.as_str()).collect(),
        )
    }
}

// =============================================================================
// Type Declaration
// =============================================================================

/// A class declared in the host program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Package-qualified name.
    pub name: QualifiedName,
    /// Access level.
    #[serde(default)]
    pub visibility: Visibility,
    /// Non-access modifiers.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Declared constructors; empty means only the implicit default one.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
    /// Declared methods in source order.
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// Source location.
    #[serde(default)]
    pub location: Location,
}

impl TypeDecl {
    /// Creates a package-private class with no members.
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Package,
            modifiers: Modifiers::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            location: Location::unknown(),
        }
    }

    /// Builder method to set the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder method to add a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = self.modifiers.with(modifier);
        self
    }

    /// Builder method to append a constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Builder method to append a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Builder method to set the source location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}
