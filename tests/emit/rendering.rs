use crosscut_emit::{RenderConfig, render, render_with_config};

use crate::bank_artifacts;

fn rendered(simple: &str) -> String {
    let artifact = bank_artifacts()
        .into_iter()
        .find(|a| a.name.simple_name() == simple)
        .unwrap();
    render(&artifact)
}

#[test]
fn account_proxy_declares_constructors_then_overrides() {
    let source = rendered("AccountStripedLockProxy");
    let no_args = source.find("public AccountStripedLockProxy() {").unwrap();
    let two_args = source
        .find("public AccountStripedLockProxy(String id, long balance) {")
        .unwrap();
    let deposit = source.find("public void deposit(long amount) {").unwrap();
    let withdraw = source
        .find("public boolean withdraw(long amount) throws java.io.IOException {")
        .unwrap();
    assert!(no_args < two_args);
    assert!(two_args < deposit);
    assert!(deposit < withdraw);
    assert!(source.contains("super(id, balance);"));
    assert_eq!(source.matches("@Override").count(), 2);
    assert!(!source.contains("balance()"));
}

#[test]
fn semaphore_proxy_creates_then_acquires() {
    let source = rendered("ReportsCrossSemaphoreProxy");
    assert!(source.contains("import io.crosscut.runtime.semaphore.SemaphoreStore;"));
    assert!(source.contains("import java.util.UUID;"));
    assert!(source.contains("protected java.util.List<String> export(String format) {"));

    let id = "UUID.fromString(\"123e4567-e89b-12d3-a456-426614174000\")";
    let create = source
        .find(&format!("SemaphoreStore.getDefault().createIfNotExists({id}, 3, 3);"))
        .unwrap();
    let acquire = source
        .find(&format!("SemaphoreStore.getDefault().acquire({id});"))
        .unwrap();
    let call = source.find("return super.export(format);").unwrap();
    let release = source
        .find(&format!("SemaphoreStore.getDefault().release({id});"))
        .unwrap();
    assert!(create < acquire && acquire < call && call < release);
}

#[test]
fn schedule_adapter_carries_queue_and_start() {
    let source = rendered("ReportsNightlyScheduledInit");
    assert!(source.starts_with("// Generated by crosscut. Do not edit.\n// Source: com.acme.bank.Reports\n"));
    assert!(source.contains("package com.acme.bank;"));
    assert!(source.contains(
        "return ScheduleTask.of(IntersectionStrategy.PUT_TO_QUEUE, 86400000, \"01-01-2025T02:00:00\", \
         () -> Reports.nightly(), \"9a7b1c2d-3e4f-4a5b-8c6d-7e8f9a0b1c2d\", 2);"
    ));
}

#[test]
fn render_config_changes_layout_only() {
    let artifacts = bank_artifacts();
    let config = RenderConfig::default().with_indent_width(2).with_header("custom");
    for artifact in &artifacts {
        let default = render(artifact);
        let custom = render_with_config(artifact, &config);
        assert!(custom.starts_with("// custom\n"));
        let strip = |s: &str| -> String {
            s.lines()
                .skip(1)
                .map(str::trim_start)
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(strip(&default), strip(&custom), "{}", artifact.name);
    }
}
