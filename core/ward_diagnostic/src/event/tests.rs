use pretty_assertions::assert_eq;

use super::*;

fn site() -> CallSite {
    CallSite::new("resize", "src/slots.rs", 42, 9)
}

#[test]
fn severity_defaults_to_error() {
    assert_eq!(Severity::default(), Severity::Error);
}

#[test]
fn severity_labels() {
    assert_eq!(Severity::Error.to_string(), "ERROR");
    assert_eq!(Severity::Warning.to_string(), "WARNING");
    assert_eq!(Severity::Script.to_string(), "SCRIPT ERROR");
    assert_eq!(Severity::Shader.to_string(), "SHADER ERROR");
}

#[test]
fn only_warning_is_not_an_error() {
    assert!(Severity::Error.is_error());
    assert!(Severity::Script.is_error());
    assert!(Severity::Shader.is_error());
    assert!(!Severity::Warning.is_error());
}

#[test]
fn index_violation_renders_canonically() {
    let violation = IndexViolation::new(5, 3, "slot", "self.len()");
    assert_eq!(
        violation.to_string(),
        "Index slot = 5 is out of bounds (self.len() = 3)."
    );
}

#[test]
fn index_event_exposes_values() {
    let event = DiagnosticEvent::index(site(), IndexViolation::new(-1, 8, "i", "n"));
    let violation = event.index_violation().unwrap();
    assert_eq!(violation.index, -1);
    assert_eq!(violation.size, 8);
    assert!(!event.fatal);
    assert_eq!(event.primary_message(), "Index i = -1 is out of bounds (n = 8).");
}

#[test]
fn message_event_has_no_index() {
    let event = DiagnosticEvent::new(site(), "Condition \"x\" is true.");
    assert!(event.index_violation().is_none());
    assert!(!event.has_detail());
    assert_eq!(event.detail(), "");
}

#[test]
fn display_with_detail() {
    let event = DiagnosticEvent::new(site(), "Condition \"x > 3\" is true.")
        .with_detail("value out of range");
    assert_eq!(
        event.to_string(),
        "ERROR: resize: Condition \"x > 3\" is true. - value out of range\n   at: src/slots.rs:42"
    );
}

#[test]
fn display_fatal_warning() {
    let event = DiagnosticEvent::new(site(), "Method/Function Failed.")
        .with_severity(Severity::Warning)
        .fatal();
    assert_eq!(
        event.to_string(),
        "WARNING: FATAL: resize: Method/Function Failed.\n   at: src/slots.rs:42"
    );
}

#[test]
fn empty_primary_renders_detail_alone() {
    let event = DiagnosticEvent::new(site(), Primary::EMPTY).with_detail("cache miss");
    assert_eq!(event.headline(), "resize: cache miss");
}

#[test]
fn primary_from_owned_string() {
    let primary = Primary::from(String::from("owned"));
    assert_eq!(primary.render(), "owned");
}
