#![no_main]
use libfuzzer_sys::fuzz_target;
use msglog::message::json::{embed_or_string, parse_embedded};

fuzz_target!(|data: &str| {
    if let Some(value) = parse_embedded(data) {
        assert!(value.is_object() || value.is_array());
    }
    let _ = embed_or_string(data);
});
