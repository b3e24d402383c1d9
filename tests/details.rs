//! Tests for the details and errors payload.

use msglog::message::json::{is_json, parse_embedded};
use msglog::message::{aggregate, error_entry};
use msglog::{Classified, Detail, Value, details};
use serde_json::json;
use std::collections::BTreeMap;

fn payload(details: &[Detail]) -> msglog::message::Aggregated {
    aggregate(&Classified::new(details))
}

#[test]
fn positional_keys_and_types() {
    let out = payload(&details!["A", 1, 1.1, true]);
    let details = serde_json::Value::Object(out.details.unwrap());
    assert_eq!(details, json!({"1": "A", "2": 1, "3": 1.1, "4": "true"}));
    assert_eq!(out.errors, None);
}

#[test]
fn keys_keep_input_order() {
    let out = payload(&details!["a", "b", "c"]);
    let keys: Vec<_> = out.details.unwrap().keys().cloned().collect();
    assert_eq!(keys, ["1", "2", "3"]);
}

#[test]
fn overrides_do_not_take_positions() {
    let d = [
        Detail::status("s"),
        Detail::from("A"),
        Detail::from(msglog::Level::Warn),
        Detail::from("B"),
    ];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(details, json!({"1": "A", "2": "B"}));
}

#[test]
fn errors_go_to_errors_only() {
    let err = std::io::Error::other("disk full");
    let d = [Detail::from("A"), Detail::error(&err), Detail::from("B")];
    let out = payload(&d);

    let details = serde_json::Value::Object(out.details.unwrap());
    assert_eq!(details, json!({"1": "A", "3": "B"}));
    assert_eq!(out.errors, Some(vec![json!({"text": "disk full"})]));
}

#[test]
fn json_strings_are_embedded() {
    let d = details![r#"{"a": 1}"#, "[1,2]", "42", "not json {"];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(
        details,
        json!({"1": {"a": 1}, "2": [1, 2], "3": "42", "4": "not json {"})
    );
}

#[test]
fn double_encoded_json_is_unquoted() {
    let encoded = serde_json::to_string(r#"{"a":1}"#).unwrap();
    assert_eq!(parse_embedded(&encoded), Some(json!({"a": 1})));
    assert!(is_json(" [true] "));
    assert!(!is_json("\"plain\""));
    assert!(!is_json("true"));
}

#[test]
fn maps_merge_and_win_collisions() {
    let mut map = BTreeMap::new();
    map.insert("1".to_string(), "from map".to_string());
    map.insert("user".to_string(), "bob".to_string());

    let d = [Detail::from("A"), Detail::from(map), Detail::from("C")];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(details, json!({"1": "from map", "3": "C", "user": "bob"}));
}

#[test]
fn nil_and_other_values() {
    let missing: Option<&str> = None;
    let d = [
        Detail::from(missing),
        Detail::debug(vec![1, 2]),
        Detail::Value(Value::Other("x".to_string())),
    ];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(details, json!({"1": "<nil>", "2": [1, 2], "3": "x"}));
}

#[test]
fn serde_values_are_embedded() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    let d = [Detail::json(&Point { x: 1, y: 2 }).unwrap()];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(details, json!({"1": {"x": 1, "y": 2}}));
}

#[test]
fn empty_payload_is_none() {
    let out = payload(&details![]);
    assert_eq!(out.details, None);
    assert_eq!(out.errors, None);

    let only_overrides = payload(&[Detail::status("ok")]);
    assert_eq!(only_overrides.details, None);
}

#[test]
fn json_errors_nest() {
    assert_eq!(
        error_entry(r#"{"id":"4001","text":"inner"}"#),
        json!({"id": "4001", "text": "inner"})
    );
    assert_eq!(error_entry("plain"), json!({"text": "plain"}));
}

#[test]
fn non_finite_floats_are_strings() {
    let d = details![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.5];
    let details = serde_json::Value::Object(payload(&d).details.unwrap());
    assert_eq!(
        details,
        json!({"1": "NaN", "2": "+Inf", "3": "-Inf", "4": 0.5})
    );
    assert_eq!(msglog::message::printf::sprintf("%v", &[&Value::Float(f64::NAN)]), "NaN");
}

#[test]
fn classification_splits_kinds() {
    let d = [Detail::status("s"), Detail::from("A")];
    assert!(d[0].is_override());
    assert!(!d[1].is_override());
    assert!(Classified::new(&d).has_values());
    assert!(!Classified::new(&d[..1]).has_values());
}
