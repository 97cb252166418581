//! Read-only declaration model for crosscut.
//!
//! This crate provides:
//! - [`TypeDecl`], [`MethodDecl`], [`ConstructorDecl`] - Declarations as the host sees them
//! - [`Attribute`] - Raw metadata attached to a declaration
//! - [`DeclarationGraph`] - The query surface the pipeline reads from
//! - [`SyntaxIndex`] - An in-memory graph loaded from a serialized index
//!
//! Nothing in this crate mutates a declaration once it has been loaded.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod declaration;
pub mod graph;
pub mod index;

pub use attribute::{Attribute, AttributeValue};
pub use declaration::{
    ConstructorDecl, MethodDecl, Modifier, Modifiers, Parameter, TypeDecl, TypeRef, Visibility,
};
pub use graph::{DeclarationGraph, MethodRef};
pub use index::SyntaxIndex;
