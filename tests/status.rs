//! Tests for status resolution.

use msglog::{Classified, Detail, ErrorCodes, RangeMap, StatusResolver, StatusTable, Value};

fn error(message: &str) -> Detail {
    Detail::Value(Value::Error(message.to_string()))
}

fn table() -> StatusTable {
    let mut table = StatusTable {
        ranges: RangeMap::from([(4000, "FAILURE".to_string())]),
        ..StatusTable::default()
    };
    table.exact.insert(2001, "SUCCESS".to_string());
    table
}

fn resolve(resolver: &StatusResolver, number: i64, details: &[Detail]) -> Option<String> {
    resolver.resolve(number, &Classified::new(details))
}

#[test]
fn override_wins_last() {
    let resolver = StatusResolver::Table(table());
    let details = [Detail::status("first"), Detail::status("second")];
    assert_eq!(resolve(&resolver, 2001, &details).as_deref(), Some("second"));
}

#[test]
fn exact_then_range() {
    let resolver = StatusResolver::Table(table());
    assert_eq!(resolve(&resolver, 2001, &[]).as_deref(), Some("SUCCESS"));
    assert_eq!(resolve(&resolver, 4500, &[]).as_deref(), Some("FAILURE"));
    assert_eq!(resolve(&resolver, 3000, &[]), None);
}

#[test]
fn derived_from_error_code() {
    let resolver = StatusResolver::default();
    let details = [error("0033E|Timeout talking to the store")];
    assert_eq!(resolve(&resolver, 1, &details).as_deref(), Some("retryable"));
}

#[test]
fn most_severe_error_code_wins() {
    let resolver = StatusResolver::default();
    let details = [
        error("0007E|Data source missing"),
        error("0048E|Out of memory"),
        error("0033E|Timeout"),
    ];
    assert_eq!(resolve(&resolver, 1, &details).as_deref(), Some("fatal"));
}

#[test]
fn unknown_codes_and_plain_errors_are_ignored() {
    let resolver = StatusResolver::default();
    let details = [error("9999E|Unknown"), error("no code here"), Detail::from("0048E|text")];
    assert_eq!(resolve(&resolver, 1, &details), None);
}

#[test]
fn custom_codes_and_precedence() {
    let codes = ErrorCodes::empty()
        .code("E1", "degraded")
        .code("E2", "down")
        .precedence(["down", "degraded"]);
    assert_eq!(codes.status_for("E1"), Some("degraded"));

    let resolver = StatusResolver::Table(StatusTable {
        error_codes: codes,
        ..StatusTable::default()
    });
    let details = [error("E1|slow"), error("E2|gone")];
    assert_eq!(resolve(&resolver, 1, &details).as_deref(), Some("down"));
}

#[test]
fn null_and_static() {
    assert_eq!(resolve(&StatusResolver::Null, 2001, &[Detail::status("x")]), None);

    let fixed = StatusResolver::Static("OK".to_string());
    assert_eq!(resolve(&fixed, 1, &[]).as_deref(), Some("OK"));
    assert_eq!(resolve(&fixed, 1, &[Detail::status("NO")]).as_deref(), Some("NO"));
}
