//! Full concern passes over the bank fixture.

use std::path::PathBuf;

use crosscut_foundation::{ErrorKind, QualifiedName};
use crosscut_model::{Attribute, DeclarationGraph, MethodDecl, SyntaxIndex, TypeDecl, Visibility};
use crosscut_synthesis::{ConcernKind, SynthesisSettings, TypeName, plan};

fn bank() -> SyntaxIndex {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bank.json");
    SyntaxIndex::load(path).unwrap()
}

fn names(kind: ConcernKind, index: &SyntaxIndex) -> Vec<String> {
    plan(index, kind, &SynthesisSettings::default())
        .unwrap()
        .iter()
        .map(|a| a.name.to_string())
        .collect()
}

#[test]
fn one_artifact_per_owner_and_kind() {
    let index = bank();
    assert_eq!(
        names(ConcernKind::MutualExclusion, &index),
        vec!["com.acme.bank.AccountStripedLockProxy"]
    );
    assert_eq!(
        names(ConcernKind::CrossSemaphore, &index),
        vec!["com.acme.bank.ReportsCrossSemaphoreProxy"]
    );
    assert_eq!(
        names(ConcernKind::Schedule, &index),
        vec!["com.acme.bank.ReportsNightlyScheduledInit"]
    );
}

#[test]
fn account_wrapper_shape() {
    let artifacts = plan(&bank(), ConcernKind::MutualExclusion, &SynthesisSettings::default()).unwrap();
    let account = &artifacts[0];
    assert_eq!(account.constructors().count(), 2);
    assert_eq!(
        account.methods().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        vec!["deposit", "withdraw"]
    );
    assert!(account.method("balance").is_none());
    assert_eq!(
        account.supertype,
        Some(QualifiedName::parse("com.acme.bank.Account"))
    );

    let withdraw = account.method("withdraw").unwrap();
    assert!(withdraw.is_override);
    assert_eq!(withdraw.visibility, Visibility::Public);
    assert_eq!(withdraw.throws.len(), 1);
}

#[test]
fn reports_wrapper_keeps_protected_visibility() {
    let artifacts = plan(&bank(), ConcernKind::CrossSemaphore, &SynthesisSettings::default()).unwrap();
    let export = artifacts[0].method("export").unwrap();
    assert_eq!(export.visibility, Visibility::Protected);
    assert!(matches!(&export.returns, TypeName::Source(t) if t.as_str() == "java.util.List<String>"));
    assert_eq!(artifacts[0].constructors().count(), 0);
}

#[test]
fn schedule_adapter_implements_schedulable() {
    let artifacts = plan(&bank(), ConcernKind::Schedule, &SynthesisSettings::default()).unwrap();
    let adapter = &artifacts[0];
    assert!(adapter.supertype.is_none());
    assert_eq!(adapter.interfaces.len(), 1);
    assert!(adapter.method("initScheduleTask").is_some());
}

#[test]
fn invalid_schedule_rejected_before_any_artifact() {
    let index = SyntaxIndex::new(vec![
        TypeDecl::new("t.Fine").with_visibility(Visibility::Public).with_method(
            MethodDecl::new("ok")
                .with_visibility(Visibility::Public)
                .with_modifier(crosscut_model::Modifier::Static)
                .with_attribute(
                    Attribute::new("Scheduled")
                        .with("interval", 500)
                        .with("id", "123e4567-e89b-12d3-a456-426614174000"),
                ),
        ),
        TypeDecl::new("t.Broken").with_visibility(Visibility::Public).with_method(
            MethodDecl::new("run")
                .with_visibility(Visibility::Public)
                .with_attribute(
                    Attribute::new("Scheduled")
                        .with("interval", 500)
                        .with("id", "123e4567-e89b-12d3-a456-426614174000"),
                ),
        ),
    ])
    .unwrap();
    let err = plan(&index, ConcernKind::Schedule, &SynthesisSettings::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidScheduleMethodModifiers);
    assert_eq!(
        err.context.as_ref().and_then(|c| c.declaration.as_deref()),
        Some("t.Broken.run")
    );
}

#[test]
fn validation_error_is_located() {
    let index = SyntaxIndex::new(vec![
        TypeDecl::new("t.Sealed")
            .with_visibility(Visibility::Public)
            .with_modifier(crosscut_model::Modifier::Final)
            .with_method(
                MethodDecl::new("run")
                    .with_visibility(Visibility::Public)
                    .with_attribute(Attribute::new("StripedLock").with("lockIdentifier", "k")),
            ),
    ])
    .unwrap();
    let err = plan(&index, ConcernKind::MutualExclusion, &SynthesisSettings::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::FinalOwningType);
    assert!(err.diagnostic().contains("t.Sealed.run"));
}

#[test]
fn planning_is_order_independent_and_idempotent() {
    let index = bank();
    let mut reversed: Vec<TypeDecl> = index.types().cloned().collect();
    reversed.reverse();
    for ty in &mut reversed {
        ty.methods.reverse();
        ty.constructors.reverse();
    }
    let reversed = SyntaxIndex::new(reversed).unwrap();

    let settings = SynthesisSettings::default();
    for kind in ConcernKind::ALL {
        let first = plan(&index, kind, &settings).unwrap();
        assert_eq!(first, plan(&index, kind, &settings).unwrap());
        assert_eq!(first, plan(&reversed, kind, &settings).unwrap(), "{kind}");
    }
}

#[test]
fn custom_markers_select_other_attributes() {
    let index = SyntaxIndex::new(vec![
        TypeDecl::new("t.Custom").with_visibility(Visibility::Public).with_method(
            MethodDecl::new("run")
                .with_visibility(Visibility::Public)
                .with_attribute(Attribute::new("Guarded").with("lockIdentifier", "k")),
        ),
    ])
    .unwrap();
    let default = plan(&index, ConcernKind::MutualExclusion, &SynthesisSettings::default()).unwrap();
    assert!(default.is_empty());

    let markers = crosscut_synthesis::Markers {
        striped_lock: "Guarded".into(),
        ..Default::default()
    };
    let settings = SynthesisSettings::default().with_markers(markers);
    assert_eq!(plan(&index, ConcernKind::MutualExclusion, &settings).unwrap().len(), 1);
}
