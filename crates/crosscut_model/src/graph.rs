//! The declaration-graph query surface.
//!
//! The pipeline never talks to a host compiler directly. It reads through
//! [`DeclarationGraph`], which any pre-parsed program representation can
//! implement; [`SyntaxIndex`](crate::SyntaxIndex) is the bundled one.

use crosscut_foundation::{Location, QualifiedName};

use crate::attribute::Attribute;
use crate::declaration::{ConstructorDecl, MethodDecl, TypeDecl};

/// Read-only queries over the declarations visible in one round.
pub trait DeclarationGraph {
    /// All types, in discovery order.
    fn types(&self) -> Box<dyn Iterator<Item = &TypeDecl> + '_>;

    /// Looks up a type by qualified name.
    fn type_decl(&self, name: &QualifiedName) -> Option<&TypeDecl> {
        self.types().find(|t| &t.name == name)
    }

    /// Constructors of a type, `None` if the type is unknown.
    fn constructors(&self, name: &QualifiedName) -> Option<&[ConstructorDecl]> {
        self.type_decl(name).map(|t| t.constructors.as_slice())
    }

    /// Metadata lookup: the attribute matching `marker` on a method.
    fn attribute<'a>(&'a self, method: &'a MethodDecl, marker: &str) -> Option<&'a Attribute> {
        method.attribute(marker)
    }

    /// Every method carrying `marker`, in discovery order.
    fn annotated_methods(&self, marker: &str) -> Vec<MethodRef<'_>> {
        self.types()
            .flat_map(|owner| {
                owner
                    .methods
                    .iter()
                    .map(move |method| MethodRef { owner, method })
            })
            .filter(|m| self.attribute(m.method, marker).is_some())
            .collect()
    }
}

/// A method together with the type that declares it.
#[derive(Clone, Copy, Debug)]
pub struct MethodRef<'a> {
    /// The declaring type.
    pub owner: &'a TypeDecl,
    /// The method itself.
    pub method: &'a MethodDecl,
}

impl MethodRef<'_> {
    /// Dotted path used in diagnostics: `pkg.Type.method`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.{}", self.owner.name, self.method.name)
    }

    /// Where the method is declared, falling back to its owner's location.
    #[must_use]
    pub fn location(&self) -> &Location {
        if self.method.location.is_unknown() {
            &self.owner.location
        } else {
            &self.method.location
        }
    }
}
