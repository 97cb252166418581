//! Integration tests for names and locations

use crosscut_foundation::{Location, QualifiedName, capitalize};

#[test]
fn qualified_name_parts() {
    let name = QualifiedName::parse("org.example.billing.Invoice");
    assert_eq!(name.package(), "org.example.billing");
    assert_eq!(name.simple_name(), "Invoice");
    assert_eq!(
        name.package_segments().collect::<Vec<_>>(),
        vec!["org", "example", "billing"]
    );
}

#[test]
fn sibling_stays_in_package() {
    let name = QualifiedName::parse("org.example.Invoice");
    assert_eq!(
        name.sibling("InvoiceStripedLockProxy").to_string(),
        "org.example.InvoiceStripedLockProxy"
    );
    let bare = QualifiedName::parse("Invoice");
    assert!(bare.sibling("Other").in_default_package());
}

#[test]
fn names_order_by_package_then_name() {
    let mut names = vec![
        QualifiedName::parse("b.A"),
        QualifiedName::parse("a.Z"),
        QualifiedName::parse("a.B"),
    ];
    names.sort();
    let rendered: Vec<String> = names.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["a.B", "a.Z", "b.A"]);
}

#[test]
fn capitalize_first_letter_only() {
    assert_eq!(capitalize("refreshCache"), "RefreshCache");
    assert_eq!(capitalize("x"), "X");
}

#[test]
fn location_display() {
    assert_eq!(Location::new("A.java", 1, 2).to_string(), "A.java:1:2");
    assert!(Location::unknown().is_unknown());
}
