//! Wrapper synthesis for the mutual-exclusion and cross-semaphore concerns.
//!
//! The artifact for an owner `pkg.T` is `pkg.T<Suffix>`, a subclass that
//! re-declares every constructor of `T` and overrides each wrapped method
//! as: pre-action, `super` call, post-action, return.

use crosscut_model::{ConstructorDecl, MethodDecl, Parameter, TypeRef, Visibility};
use tracing::trace;

use crate::artifact::{
    ConstructorSpec, DerivedArtifact, Expr, Member, MethodSpec, Origin, Param, Receiver, Stmt,
    TypeName,
};
use crate::bindings::{RuntimeBindings, uuid_literal};
use crate::concern::{ConcernKind, WrapConcern};
use crate::group::WrapGroup;

/// Base name of the local holding a non-void result.
const RESULT_LOCAL: &str = "result";

/// Builds overriding subclasses from wrap groups.
#[derive(Clone, Copy, Debug)]
pub struct WrapSynthesizer<'b> {
    bindings: &'b RuntimeBindings,
    release_on_failure: bool,
}

impl<'b> WrapSynthesizer<'b> {
    /// Creates a synthesizer that releases in a `finally` block.
    #[must_use]
    pub const fn new(bindings: &'b RuntimeBindings) -> Self {
        Self {
            bindings,
            release_on_failure: true,
        }
    }

    /// Chooses whether the post-action also runs when the call throws.
    #[must_use]
    pub const fn with_release_on_failure(mut self, release_on_failure: bool) -> Self {
        self.release_on_failure = release_on_failure;
        self
    }

    /// Synthesizes the artifact for one owner.
    #[must_use]
    pub fn synthesize(&self, group: &WrapGroup<'_>) -> DerivedArtifact {
        let owner = &group.owner.name;
        let name = owner.sibling(format!("{}{}", owner.simple_name(), group.kind.suffix()));

        let mut constructors: Vec<&ConstructorDecl> = group
            .constructors
            .iter()
            .filter(|c| c.visibility != Visibility::Private)
            .collect();
        constructors.sort_by(|a, b| param_types(&a.parameters).cmp(&param_types(&b.parameters)));
        constructors.dedup_by(|a, b| param_types(&a.parameters) == param_types(&b.parameters));

        let mut methods: Vec<_> = group.methods.iter().collect();
        methods.sort_by(|a, b| a.decl.signature_key().cmp(&b.decl.signature_key()));
        methods.dedup_by(|a, b| a.decl.signature_key() == b.decl.signature_key());

        let members = constructors
            .into_iter()
            .map(|c| Member::Constructor(self.constructor(c)))
            .chain(
                methods
                    .into_iter()
                    .map(|m| Member::Method(self.method(m.decl, &m.concern))),
            )
            .collect();

        trace!(artifact = %name, methods = group.methods.len(), "synthesized wrapper");
        DerivedArtifact {
            name,
            origin: Origin {
                kind: group.kind,
                source: owner.clone(),
            },
            doc: contract(group.kind),
            supertype: Some(owner.clone()),
            interfaces: Vec::new(),
            members,
        }
    }

    #[allow(clippy::unused_self)]
    fn constructor(&self, decl: &ConstructorDecl) -> ConstructorSpec {
        ConstructorSpec {
            visibility: Visibility::Public,
            params: params(&decl.parameters),
            throws: source_types(&decl.throws),
            body: vec![Stmt::Expr(Expr::SuperInit(arguments(&decl.parameters)))],
        }
    }

    fn method(&self, decl: &MethodDecl, concern: &WrapConcern) -> MethodSpec {
        let (pre, post) = self.actions(concern);
        let call = Expr::call(Receiver::Super, decl.name.as_str(), arguments(&decl.parameters));
        let returns = TypeName::Source(decl.returns.clone());

        let mut body = pre;
        if self.release_on_failure {
            let guarded = if returns.is_void() {
                Stmt::Expr(call)
            } else {
                Stmt::Return(call)
            };
            body.push(Stmt::TryFinally {
                body: vec![guarded],
                finally: post,
            });
        } else if returns.is_void() {
            body.push(Stmt::Expr(call));
            body.extend(post);
        } else {
            let local = result_local(&decl.parameters, &concern.referenced_identifiers());
            body.push(Stmt::Let {
                ty: returns.clone(),
                name: local.clone(),
                value: call,
            });
            body.extend(post);
            body.push(Stmt::Return(Expr::Ident(local)));
        }

        MethodSpec {
            name: decl.name.clone(),
            visibility: decl.visibility,
            is_override: true,
            type_params: decl.type_parameters.clone(),
            params: params(&decl.parameters),
            returns,
            throws: source_types(&decl.throws),
            body,
        }
    }

    /// Statements run before and after the wrapped call.
    fn actions(&self, concern: &WrapConcern) -> (Vec<Stmt>, Vec<Stmt>) {
        match concern {
            WrapConcern::MutualExclusion { lock_identifier } => {
                let on_lock = |op: &str| {
                    Stmt::Expr(Expr::call(
                        self.bindings.lock_registry(),
                        op,
                        vec![Expr::Raw(lock_identifier.clone())],
                    ))
                };
                (vec![on_lock("acquire")], vec![on_lock("release")])
            }
            WrapConcern::CrossSemaphore {
                semaphore_id,
                permits,
            } => {
                let permits = Expr::Int(i64::from(permits.get()));
                let on_store = |op: &str, mut args: Vec<Expr>| {
                    args.insert(0, uuid_literal(semaphore_id));
                    Stmt::Expr(Expr::call(self.bindings.semaphore_store(), op, args))
                };
                (
                    vec![
                        on_store("createIfNotExists", vec![permits.clone(), permits]),
                        on_store("acquire", Vec::new()),
                    ],
                    vec![on_store("release", Vec::new())],
                )
            }
        }
    }
}

/// Consumer-side ordering guarantees of the generated overrides.
fn contract(kind: ConcernKind) -> Vec<String> {
    let resource = match kind {
        ConcernKind::CrossSemaphore => "a semaphore permit",
        _ => "the lock",
    };
    vec![
        format!("Wraps overridden methods with the {kind} concern."),
        format!("Each override acquires {resource} before the inherited method runs"),
        "and releases it after the call, on the calling thread.".to_string(),
    ]
}

fn param_types(parameters: &[Parameter]) -> Vec<&str> {
    parameters.iter().map(|p| p.ty.as_str()).collect()
}

fn params(parameters: &[Parameter]) -> Vec<Param> {
    parameters
        .iter()
        .map(|p| Param {
            name: p.name.clone(),
            ty: TypeName::Source(p.ty.clone()),
        })
        .collect()
}

fn arguments(parameters: &[Parameter]) -> Vec<Expr> {
    parameters
        .iter()
        .map(|p| Expr::Ident(p.name.clone()))
        .collect()
}

fn source_types(types: &[TypeRef]) -> Vec<TypeName> {
    types.iter().cloned().map(TypeName::Source).collect()
}

/// A local name that neither a parameter nor an identifier referenced by
/// the pre/post actions shadows: `result`, `result1`, `result2`, ...
fn result_local(parameters: &[Parameter], reserved: &[&str]) -> String {
    let taken = |candidate: &str| {
        parameters.iter().any(|p| p.name == candidate) || reserved.contains(&candidate)
    };
    if !taken(RESULT_LOCAL) {
        return RESULT_LOCAL.to_string();
    }
    (1..)
        .map(|n| format!("{RESULT_LOCAL}{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| format!("{RESULT_LOCAL}_"))
}
