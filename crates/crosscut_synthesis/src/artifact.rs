//! Derived artifact intermediate representation.
//!
//! A [`DerivedArtifact`] describes one generated type: its name, what it
//! extends or implements, and its members as typed statements. Rendering
//! to source text happens in `crosscut_emit`; nothing here holds
//! pre-formatted code except caller-supplied expressions ([`Expr::Raw`]).

use crosscut_foundation::QualifiedName;
use crosscut_model::{TypeRef, Visibility};

use crate::concern::ConcernKind;

// =============================================================================
// Artifact
// =============================================================================

/// A new type to be emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedArtifact {
    /// Package-qualified name of the generated type.
    pub name: QualifiedName,
    /// What produced this artifact.
    pub origin: Origin,
    /// Type-level documentation, one entry per line.
    pub doc: Vec<String>,
    /// Class this type extends, if any.
    pub supertype: Option<QualifiedName>,
    /// Interfaces this type implements.
    pub interfaces: Vec<QualifiedName>,
    /// Constructors and methods, in emission order.
    pub members: Vec<Member>,
}

impl DerivedArtifact {
    /// Constructors of this artifact.
    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorSpec> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            Member::Method(_) => None,
        })
    }

    /// Methods of this artifact.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Constructor(_) => None,
        })
    }

    /// Looks up a generated method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods().find(|m| m.name == name)
    }
}

/// Provenance of an artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    /// Concern that produced it.
    pub kind: ConcernKind,
    /// The owning type it was derived from.
    pub source: QualifiedName,
}

// =============================================================================
// Members
// =============================================================================

/// A member of a generated type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// A constructor.
    Constructor(ConstructorSpec),
    /// A method.
    Method(MethodSpec),
}

/// A type as it appears in generated code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeName {
    /// Host source text, emitted verbatim.
    Source(TypeRef),
    /// A collaborator class, subject to import management.
    Class(QualifiedName),
}

impl TypeName {
    /// Returns true for the "no value" return type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Source(ty) if ty.is_void())
    }
}

/// A formal parameter of a generated member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeName,
}

/// A generated constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorSpec {
    /// Access level.
    pub visibility: Visibility,
    /// Formal parameters.
    pub params: Vec<Param>,
    /// Declared exceptions.
    pub throws: Vec<TypeName>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

/// A generated method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    /// Method name.
    pub name: String,
    /// Access level.
    pub visibility: Visibility,
    /// Whether the method overrides an inherited one.
    pub is_override: bool,
    /// Type variables declared before the return type, bounds included.
    pub type_params: Vec<String>,
    /// Formal parameters.
    pub params: Vec<Param>,
    /// Return type.
    pub returns: TypeName,
    /// Declared exceptions.
    pub throws: Vec<TypeName>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

// =============================================================================
// Statements and Expressions
// =============================================================================

/// A statement in a generated body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// An expression evaluated for its effect.
    Expr(Expr),
    /// A local binding: `Type name = value;`
    Let {
        /// Declared type of the local.
        ty: TypeName,
        /// Local name.
        name: String,
        /// Initializer.
        value: Expr,
    },
    /// `return value;`
    Return(Expr),
    /// `try { body } finally { finally }`
    TryFinally {
        /// Guarded statements.
        body: Vec<Stmt>,
        /// Statements run on every exit path.
        finally: Vec<Stmt>,
    },
}

/// An expression in a generated body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A local or parameter reference.
    Ident(String),
    /// A string literal.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A caller-supplied expression, emitted verbatim.
    Raw(String),
    /// A method call.
    Call {
        /// What the method is called on.
        receiver: Receiver,
        /// Method name.
        method: String,
        /// Arguments.
        args: Vec<Expr>,
    },
    /// `super(args)` inside a constructor.
    SuperInit(Vec<Expr>),
    /// A zero-argument lambda: `() -> body`.
    Lambda(Box<Expr>),
    /// A constant of a class: `Owner.NAME`.
    Constant {
        /// Declaring class.
        owner: QualifiedName,
        /// Constant name.
        name: String,
    },
}

impl Expr {
    /// Builds a call expression.
    pub fn call(receiver: Receiver, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            receiver,
            method: method.into(),
            args,
        }
    }

    /// Builds a static call on a class.
    pub fn static_call(owner: &QualifiedName, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(Receiver::Class(owner.clone()), method, args)
    }
}

/// What a call is dispatched on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// The superclass implementation.
    Super,
    /// A class, for static calls.
    Class(QualifiedName),
    /// The value of an expression.
    Value(Box<Expr>),
}
