use crosscut_emit::MemoryEmitter;
use crosscut_foundation::ErrorKind;
use crosscut_model::{Attribute, MethodDecl, SyntaxIndex, TypeDecl, Visibility};
use crosscut_runtime::{GeneratorConfig, Pipeline};
use crosscut_synthesis::ConcernKind;

use crate::{bank, read};

const ACCOUNT: &str = "com/acme/bank/AccountStripedLockProxy.java";
const REPORTS: &str = "com/acme/bank/ReportsCrossSemaphoreProxy.java";
const NIGHTLY: &str = "com/acme/bank/ReportsNightlyScheduledInit.java";

#[test]
fn separate_runs_are_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    Pipeline::new(GeneratorConfig::default().with_output_dir(first.path()))
        .run_round(&bank())
        .unwrap();
    Pipeline::new(GeneratorConfig::default().with_output_dir(second.path()))
        .run_round(&bank())
        .unwrap();
    for path in [ACCOUNT, REPORTS, NIGHTLY] {
        assert_eq!(read(first.path(), path), read(second.path(), path), "{path}");
    }
}

#[test]
fn report_lists_every_unit_by_kind() {
    let mut emitter = MemoryEmitter::new();
    let report = Pipeline::default().run_round_with(&bank(), &mut emitter).unwrap();
    assert_eq!(report.written(), 3);
    for kind in ConcernKind::ALL {
        assert_eq!(report.for_kind(kind).count(), 1, "{kind}");
    }
    let nightly = report.for_kind(ConcernKind::Schedule).next().unwrap();
    assert_eq!(nightly.source.to_string(), "com.acme.bank.Reports");
    assert_eq!(nightly.relative_path.to_str(), Some(NIGHTLY));
}

#[test]
fn check_then_write_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(GeneratorConfig::default().with_output_dir(dir.path()));

    assert_eq!(pipeline.check_round(&bank()).unwrap().stale(), 3);
    pipeline.run_round(&bank()).unwrap();
    assert_eq!(pipeline.check_round(&bank()).unwrap().stale(), 0);

    std::fs::write(dir.path().join(REPORTS), "").unwrap();
    let report = pipeline.check_round(&bank()).unwrap();
    let stale: Vec<_> = report
        .with_outcome(crosscut_emit::EmitOutcome::Stale)
        .map(|u| u.name.to_string())
        .collect();
    assert_eq!(stale, vec!["com.acme.bank.ReportsCrossSemaphoreProxy"]);
}

#[test]
fn default_package_lands_at_output_root() {
    let index = SyntaxIndex::new(vec![
        TypeDecl::new("Counter").with_visibility(Visibility::Public).with_method(
            MethodDecl::new("bump")
                .with_visibility(Visibility::Public)
                .with_attribute(Attribute::new("StripedLock").with("lockIdentifier", "\"counter\"")),
        ),
    ])
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    Pipeline::new(GeneratorConfig::default().with_output_dir(dir.path()))
        .run_round(&index)
        .unwrap();
    let source = read(dir.path(), "CounterStripedLockProxy.java");
    assert!(!source.contains("package "));
    assert!(source.contains("public class CounterStripedLockProxy extends Counter {"));
    assert!(source.contains("LockRegistry.getInstance().acquire(\"counter\");"));
}

#[test]
fn diagnostic_names_file_and_line() {
    let index = SyntaxIndex::from_json(
        r#"{
          "types": [{
            "name": "com.acme.Jobs",
            "visibility": "public",
            "methods": [{
              "name": "tick",
              "visibility": "public",
              "modifiers": ["static"],
              "location": { "file": "src/com/acme/Jobs.java", "line": 12, "column": 5 },
              "attributes": [{
                "name": "Scheduled",
                "arguments": { "interval": 50, "id": "123e4567-e89b-12d3-a456-426614174000" }
              }]
            }]
          }]
        }"#,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = Pipeline::new(GeneratorConfig::default().with_output_dir(dir.path()))
        .run_round(&index)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IntervalTooSmall(50));
    let diagnostic = err.diagnostic();
    assert!(diagnostic.starts_with("error[IntervalTooSmall]"));
    assert!(diagnostic.contains("src/com/acme/Jobs.java:12:5 (com.acme.Jobs.tick)"));
}

#[test]
fn unresolvable_attribute_value_aborts_round() {
    let index = SyntaxIndex::new(vec![
        TypeDecl::new("a.Jobs").with_visibility(Visibility::Public).with_method(
            MethodDecl::new("tick")
                .with_visibility(Visibility::Public)
                .with_attribute(Attribute::new("StripedLock").with("lockIdentifier", 7)),
        ),
    ])
    .unwrap();
    let mut emitter = MemoryEmitter::new();
    let err = Pipeline::default().run_round_with(&index, &mut emitter).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedConfig { .. }));
    assert!(emitter.is_empty());
}
