//! Grouping of validated entries into synthesis units.
//!
//! Wrapping concerns produce one artifact per owning type, so their entries
//! are gathered per `(kind, owner)`. Schedule entries each stand alone.
//! Groups come back in the order their first entry was discovered.

use std::collections::HashMap;

use crosscut_foundation::{Error, ErrorKind, QualifiedName, Result};
use crosscut_model::{ConstructorDecl, DeclarationGraph, MethodDecl, TypeDecl};

use crate::concern::{Concern, ConcernKind, ScheduleSpec, ValidEntry, WrapConcern};

/// A wrapped method and the concern applied to it.
#[derive(Clone, Debug)]
pub struct WrappedMethod<'a> {
    /// The method to override.
    pub decl: &'a MethodDecl,
    /// What runs around the call.
    pub concern: WrapConcern,
}

/// All wrapped methods of one owner for one concern.
#[derive(Clone, Debug)]
pub struct WrapGroup<'a> {
    /// Concern applied to every method in the group.
    pub kind: ConcernKind,
    /// The owning type, as resolved through the graph.
    pub owner: &'a TypeDecl,
    /// The owner's declared constructors.
    pub constructors: &'a [ConstructorDecl],
    /// Methods in discovery order.
    pub methods: Vec<WrappedMethod<'a>>,
}

/// A single scheduled method.
#[derive(Clone, Debug)]
pub struct ScheduleGroup<'a> {
    /// The type declaring the method.
    pub owner: &'a TypeDecl,
    /// The static, parameterless method to run.
    pub method: &'a MethodDecl,
    /// Its validated schedule.
    pub spec: ScheduleSpec,
}

/// A unit of synthesis: one derived artifact comes out of each.
#[derive(Clone, Debug)]
pub enum SynthesisGroup<'a> {
    /// Overriding subclass of one owner.
    Wrap(WrapGroup<'a>),
    /// Schedule adapter for one method.
    Schedule(ScheduleGroup<'a>),
}

impl SynthesisGroup<'_> {
    /// Concern that produced the group.
    #[must_use]
    pub fn kind(&self) -> ConcernKind {
        match self {
            Self::Wrap(group) => group.kind,
            Self::Schedule(_) => ConcernKind::Schedule,
        }
    }

    /// Name of the owning type.
    #[must_use]
    pub fn owner(&self) -> &QualifiedName {
        match self {
            Self::Wrap(group) => &group.owner.name,
            Self::Schedule(group) => &group.owner.name,
        }
    }
}

/// Groups validated entries, resolving each owner through `graph`.
///
/// # Errors
///
/// Returns `UnresolvedOwner` if an entry's owner is not in the graph.
pub fn group_entries<'a, G>(graph: &'a G, entries: Vec<ValidEntry<'a>>) -> Result<Vec<SynthesisGroup<'a>>>
where
    G: DeclarationGraph + ?Sized,
{
    let mut groups: Vec<SynthesisGroup<'a>> = Vec::new();
    let mut slots: HashMap<(ConcernKind, QualifiedName), usize> = HashMap::new();

    for entry in entries {
        let name = &entry.method.owner.name;
        let owner = graph.type_decl(name).ok_or_else(|| {
            Error::new(ErrorKind::UnresolvedOwner(name.to_string()))
                .at_declaration(entry.method.path(), entry.method.location())
        })?;
        let decl = entry.method.method;

        match entry.concern {
            Concern::Schedule(spec) => groups.push(SynthesisGroup::Schedule(ScheduleGroup {
                owner,
                method: decl,
                spec,
            })),
            Concern::Wrap(concern) => {
                let kind = concern.kind();
                let method = WrappedMethod { decl, concern };
                match slots.get(&(kind, owner.name.clone())) {
                    Some(&slot) => {
                        if let SynthesisGroup::Wrap(group) = &mut groups[slot] {
                            group.methods.push(method);
                        }
                    }
                    None => {
                        slots.insert((kind, owner.name.clone()), groups.len());
                        groups.push(SynthesisGroup::Wrap(WrapGroup {
                            kind,
                            owner,
                            constructors: graph.constructors(&owner.name).unwrap_or(&[]),
                            methods: vec![method],
                        }));
                    }
                }
            }
        }
    }
    Ok(groups)
}
