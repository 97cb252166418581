//! Integration tests for Error types
//!
//! Tests error construction, display, context, and diagnostics.

use crosscut_foundation::{Error, ErrorContext, ErrorKind, Location};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_malformed_config() {
    let err = Error::malformed("StripedLock", "missing key `lockIdentifier`");
    assert!(matches!(err.kind, ErrorKind::MalformedConfig { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("@StripedLock"));
    assert!(msg.contains("lockIdentifier"));
}

#[test]
fn error_emission_failed() {
    let err = Error::emission_failed("out/a/B.java", "permission denied");
    let ErrorKind::EmissionFailed { path, message } = &err.kind else {
        panic!("expected EmissionFailed");
    };
    assert_eq!(path, "out/a/B.java");
    assert_eq!(message, "permission denied");
}

#[test]
fn error_invalid_index_and_config() {
    assert!(matches!(
        Error::invalid_index("bad json").kind,
        ErrorKind::InvalidIndex(_)
    ));
    assert!(matches!(
        Error::invalid_config("bad toml").kind,
        ErrorKind::InvalidConfig(_)
    ));
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn validation_messages_name_the_value() {
    assert!(ErrorKind::InvalidPermitCount(0).to_string().contains('0'));
    assert!(ErrorKind::IntervalTooSmall(100).to_string().contains("100ms"));
    assert!(ErrorKind::QueueSizeRequired(0).to_string().contains("PUT_TO_QUEUE"));
    assert!(
        ErrorKind::InvalidSemaphoreId("not-a-uuid".into())
            .to_string()
            .contains("not-a-uuid")
    );
}

#[test]
fn validation_kinds_classified() {
    assert!(ErrorKind::FinalMethod.is_validation());
    assert!(ErrorKind::NoAccessibleConstructor.is_validation());
    assert!(ErrorKind::InvalidStartTime("x".into()).is_validation());
    assert!(!ErrorKind::DuplicateArtifact("x".into()).is_validation());
    assert!(!Error::malformed("a", "b").kind.is_validation());
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostic_without_context_is_one_line() {
    let err = Error::new(ErrorKind::NonPublicOwningType);
    assert_eq!(
        err.diagnostic(),
        "error[NonPublicOwningType]: class for overriding must be public"
    );
}

#[test]
fn diagnostic_with_declaration_only() {
    let err = Error::new(ErrorKind::StaticMethod)
        .with_context(ErrorContext::new().with_declaration("com.acme.Ledger.post"));
    assert!(err.diagnostic().ends_with("\n  --> com.acme.Ledger.post"));
}

#[test]
fn at_declaration_sets_location() {
    let err = Error::new(ErrorKind::FinalOwningType)
        .at_declaration("a.B.run", &Location::new("src/a/B.java", 7, 3));
    assert_eq!(
        err.diagnostic(),
        "error[FinalOwningType]: class for overriding must not be final\n  --> src/a/B.java:7:3 (a.B.run)"
    );
}
