#![no_main]
use libfuzzer_sys::fuzz_target;
use msglog::Value;
use msglog::message::printf::{count_conversions, sprintf};

fuzz_target!(|data: &str| {
    // Must not panic on any template string
    let args = [
        Value::String("text".to_string()),
        Value::Int(-42),
        Value::Float(1.5),
        Value::Bool(true),
        Value::Nil,
    ];
    let refs: Vec<&Value> = args.iter().collect();
    let _ = sprintf(data, &refs);
    let _ = sprintf(data, &[]);
    let _ = count_conversions(data);
});
