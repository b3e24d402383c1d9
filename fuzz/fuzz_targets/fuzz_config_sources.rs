#![no_main]
use libfuzzer_sys::fuzz_target;
use msglog::Config;
use msglog::config::extract_sources;

fuzz_target!(|data: &str| {
    let (sources, rest) = extract_sources(data);
    assert!(sources.iter().all(|s| !s.is_empty()));
    let _ = Config::from_toml(&rest);
});
