//! Core types shared by every crosscut layer.
//!
//! This crate provides:
//! - [`Error`] / [`ErrorKind`] - The pipeline's error taxonomy with diagnostic context
//! - [`Location`] - Source positions of host declarations
//! - [`QualifiedName`] - Package-qualified type names

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod location;
pub mod name;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use location::Location;
pub use name::{QualifiedName, capitalize};
