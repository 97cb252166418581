//! Integration tests for DeclarationGraph queries

use crosscut_foundation::QualifiedName;
use crosscut_model::{DeclarationGraph, SyntaxIndex};

use crate::fixture;

fn bank() -> SyntaxIndex {
    SyntaxIndex::load(fixture("bank.json")).unwrap()
}

#[test]
fn annotated_methods_in_discovery_order() {
    let index = bank();
    let paths: Vec<String> = index
        .annotated_methods("StripedLock")
        .iter()
        .map(|m| m.path())
        .collect();
    assert_eq!(
        paths,
        vec!["com.acme.bank.Account.withdraw", "com.acme.bank.Account.deposit"]
    );
}

#[test]
fn qualified_marker_matches_simple_attribute() {
    let index = bank();
    assert_eq!(
        index
            .annotated_methods("com.acme.concurrency.StripedLock")
            .len(),
        2
    );
}

#[test]
fn attribute_lookup() {
    let index = bank();
    let reports = index
        .type_decl(&QualifiedName::parse("com.acme.bank.Reports"))
        .unwrap();
    let export = &reports.methods[0];
    let attribute = index.attribute(export, "CrossSemaphore").unwrap();
    assert_eq!(attribute.get("permits").and_then(|v| v.as_int()), Some(3));
    assert!(index.attribute(export, "Scheduled").is_none());
}

#[test]
fn constructors_of_unknown_type_is_none() {
    let index = bank();
    assert!(index.constructors(&QualifiedName::parse("x.Missing")).is_none());
    assert_eq!(
        index
            .constructors(&QualifiedName::parse("com.acme.bank.Account"))
            .map(<[_]>::len),
        Some(2)
    );
}

#[test]
fn method_location_falls_back_to_owner() {
    let index = bank();
    let export = index
        .annotated_methods("CrossSemaphore")
        .into_iter()
        .next()
        .unwrap();
    assert_eq!(export.location().line, 5);
}
