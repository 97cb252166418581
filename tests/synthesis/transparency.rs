//! Argument/return transparency and pre/post ordering of wrappers.

use std::num::NonZeroU32;

use crosscut_model::{MethodDecl, TypeDecl, Visibility};
use crosscut_synthesis::{
    ConcernKind, DerivedArtifact, RuntimeBindings, WrapConcern, WrapGroup, WrapSynthesizer,
    WrappedMethod,
};
use proptest::prelude::*;
use uuid::Uuid;

use crate::interpreter::{Flow, Machine, Value};

fn owner_with(params: &[String], returns: &str) -> TypeDecl {
    let mut method = MethodDecl::new("call")
        .with_visibility(Visibility::Public)
        .with_returns(returns);
    for name in params {
        method = method.with_param(name.as_str(), "int");
    }
    TypeDecl::new("t.Owner")
        .with_visibility(Visibility::Public)
        .with_method(method)
}

fn synthesize(owner: &TypeDecl, concern: WrapConcern, release_on_failure: bool) -> DerivedArtifact {
    let bindings = RuntimeBindings::default();
    let group = WrapGroup {
        kind: concern.kind(),
        owner,
        constructors: &owner.constructors,
        methods: vec![WrappedMethod {
            decl: &owner.methods[0],
            concern,
        }],
    };
    WrapSynthesizer::new(&bindings)
        .with_release_on_failure(release_on_failure)
        .synthesize(&group)
}

fn lock() -> WrapConcern {
    WrapConcern::MutualExclusion {
        lock_identifier: "this.key".into(),
    }
}

fn semaphore() -> WrapConcern {
    WrapConcern::CrossSemaphore {
        semaphore_id: Uuid::nil(),
        permits: NonZeroU32::MIN,
    }
}

fn param_names() -> impl Strategy<Value = Vec<String>> {
    (
        prop::collection::btree_set("[a-z][a-z0-9]{0,5}", 0..5),
        any::<bool>(),
    )
        .prop_map(|(names, with_result)| {
            let mut names: Vec<String> = names.into_iter().collect();
            if with_result {
                names.retain(|n| n != "result");
                names.push("result".to_string());
            }
            names
        })
}

proptest! {
    #[test]
    fn wrapper_passes_arguments_and_returns_result(
        params in param_names(),
        non_void in any::<bool>(),
        release_on_failure in any::<bool>(),
    ) {
        let returns = if non_void { "int" } else { "void" };
        let owner = owner_with(&params, returns);
        let artifact = synthesize(&owner, lock(), release_on_failure);
        let method = artifact.method("call").unwrap();

        let args: Vec<Value> = (0..params.len()).map(|i| Value::Int(i as i64 * 7)).collect();
        let mut machine = Machine::default();
        let flow = machine.invoke(method, &args);

        prop_assert_eq!(machine.super_args.as_ref(), Some(&args));
        if non_void {
            prop_assert_eq!(flow, Flow::Return(Value::Echo(args)));
        } else {
            prop_assert_eq!(flow, Flow::Next);
        }
    }

    #[test]
    fn pre_action_before_and_post_action_after(
        params in param_names(),
        non_void in any::<bool>(),
        release_on_failure in any::<bool>(),
        use_semaphore in any::<bool>(),
    ) {
        let owner = owner_with(&params, if non_void { "long" } else { "void" });
        let concern = if use_semaphore { semaphore() } else { lock() };
        let artifact = synthesize(&owner, concern, release_on_failure);
        let method = artifact.method("call").unwrap();

        let args: Vec<Value> = params.iter().map(|p| Value::Str(p.clone())).collect();
        let mut machine = Machine::default();
        machine.invoke(method, &args);

        let acquire = machine.position("acquire").unwrap();
        let call = machine.position("super.call").unwrap();
        let release = machine.position("release").unwrap();
        prop_assert!(acquire < call);
        prop_assert!(call < release);
        prop_assert_eq!(machine.events.len(), if use_semaphore { 4 } else { 3 });
    }
}

#[test]
fn throwing_call_releases_when_configured() {
    let owner = owner_with(&[], "int");
    let artifact = synthesize(&owner, lock(), true);
    let mut machine = Machine::throwing();
    let flow = machine.invoke(artifact.method("call").unwrap(), &[]);
    assert_eq!(flow, Flow::Throw);
    assert!(machine.position("release").is_some());
}

#[test]
fn throwing_call_skips_release_in_straight_line_mode() {
    let owner = owner_with(&[], "int");
    let artifact = synthesize(&owner, lock(), false);
    let mut machine = Machine::throwing();
    let flow = machine.invoke(artifact.method("call").unwrap(), &[]);
    assert_eq!(flow, Flow::Throw);
    assert_eq!(machine.events, vec!["acquire", "super.call"]);
}

#[test]
fn semaphore_is_created_before_acquire() {
    let owner = owner_with(&["x".to_string()], "void");
    let artifact = synthesize(&owner, semaphore(), true);
    let mut machine = Machine::default();
    machine.invoke(artifact.method("call").unwrap(), &[Value::Int(1)]);
    assert_eq!(
        machine.events,
        vec!["createIfNotExists", "acquire", "super.call", "release"]
    );
}

#[test]
fn kinds_map_to_suffixes() {
    let owner = owner_with(&[], "void");
    assert_eq!(
        synthesize(&owner, semaphore(), true).origin.kind,
        ConcernKind::CrossSemaphore
    );
    assert_eq!(
        synthesize(&owner, lock(), true).name.simple_name(),
        "OwnerStripedLockProxy"
    );
}
