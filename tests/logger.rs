//! Tests for the logger: gate, pipeline, and outputs end to end.

use chrono::{TimeZone, Utc};
use msglog::{Detail, Error, Field, Level, Logger, MemoryOutput, WriterOutput, details};
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::process::Command;

fn logger_with(output: &MemoryOutput) -> Logger {
    Logger::builder()
        .messages([(2001, "%s works with %s"), (4001, "lost %s")])
        .hide_timestamp(true)
        .without_field(Field::Location)
        .output(output.clone())
        .build()
        .unwrap()
}

#[test]
fn builder_defaults() {
    let logger = Logger::builder().build().unwrap();
    assert_eq!(logger.level(), Level::Info);
    assert_eq!(logger.output_count(), 1);
    assert!(logger.is_info());
    assert!(!logger.is_debug());
}

#[test]
fn builder_rejects_invalid_options() {
    assert!(matches!(
        Logger::builder().level_name("LOUD").build(),
        Err(Error::InvalidLevel(_))
    ));
    assert!(matches!(
        Logger::builder().component("app-", 0).build(),
        Err(Error::ComponentIdOutOfRange(0))
    ));
}

#[test]
fn end_to_end_record() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);

    logger.log(2001, &details!["Bob", "Jane"]);

    assert_eq!(
        output.lines(),
        [r#"{"level":"INFO","id":"2001","text":"Bob works with Jane","details":{"1":"Bob","2":"Jane"}}"#]
    );
}

#[test]
fn all_fields_in_fixed_order() {
    let output = MemoryOutput::new();
    let logger = Logger::builder()
        .statuses([(2001, "ok")])
        .output(output.clone())
        .build()
        .unwrap();

    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let boom = std::io::Error::other("boom");
    logger.log(
        2001,
        &[
            Detail::timestamp(at),
            Detail::text("x"),
            Detail::code("C1"),
            Detail::reason("R1"),
            Detail::duration_nanos(5),
            Detail::location("here"),
            Detail::from("A"),
            Detail::error(&boom),
        ],
    );

    assert_eq!(
        output.lines(),
        [concat!(
            r#"{"date":"2024-01-02","time":"03:04:05.000000000","level":"INFO","id":"2001","#,
            r#""status":"ok","text":"x","code":"C1","reason":"R1","duration":5,"location":"here","#,
            r#""errors":[{"text":"boom"}],"details":{"1":"A"}}"#
        )]
    );
}

#[test]
fn timestamp_is_written_by_default() {
    let output = MemoryOutput::new();
    let logger = Logger::builder().output(output.clone()).build().unwrap();

    logger.log(2001, &[]);

    let record = output.last_json().unwrap();
    assert_eq!(record["date"].as_str().unwrap().len(), "2024-01-02".len());
    assert!(record["time"].as_str().unwrap().contains('.'));
}

#[test]
fn gate_filters_below_level() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);
    logger.set_level(Level::Warn);

    assert!(!logger.try_log(2001, &details!["Bob", "Jane"]).unwrap());
    assert!(output.is_empty());

    assert!(logger.try_log(2001, &details![Level::Error, "Bob", "Jane"]).unwrap());
    let record = output.last_json().unwrap();
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["text"], "Bob works with Jane");
}

#[test]
fn guards_are_monotonic() {
    let logger = Logger::builder().build().unwrap();

    for level in Level::all() {
        logger.set_level(level);
        assert_eq!(logger.level(), level);
        assert_eq!(logger.level_as_str(), level.as_str());

        let guards = [
            logger.is_trace(),
            logger.is_debug(),
            logger.is_info(),
            logger.is_warn(),
            logger.is_error(),
            logger.is_fatal(),
            logger.is_panic(),
        ];
        for (other, enabled) in Level::all().into_iter().zip(guards) {
            assert_eq!(enabled, other >= level, "{other} at {level}");
            assert_eq!(logger.is_enabled(other), other >= level);
        }
    }
}

#[test]
fn set_level_by_name() {
    let logger = Logger::builder().build().unwrap();

    logger.set_level_from_str("debug").unwrap();
    assert_eq!(logger.level(), Level::Debug);

    assert!(matches!(
        logger.set_level_from_str("BAD-NAME"),
        Err(Error::InvalidLevel(name)) if name == "BAD-NAME"
    ));
    assert_eq!(logger.level(), Level::Panic);
    assert!(!logger.is_fatal());
    assert!(logger.is_panic());
}

#[test]
fn message_ignores_level_and_writes_nothing() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);
    logger.set_level(Level::Panic);

    let first = logger.message(2001, &details!["Bob", "Jane"]).unwrap();
    let second = logger.message(2001, &details!["Bob", "Jane"]).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("Bob works with Jane"));
    assert!(output.is_empty());
}

#[test]
fn fatal_message_does_not_exit() {
    let logger = Logger::builder()
        .hide_timestamp(true)
        .without_field(Field::Location)
        .build()
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&logger.message(5001, &[]).unwrap()).unwrap();
    assert_eq!(json, json!({"level": "FATAL", "id": "5001"}));
}

#[test]
fn new_error_nests_into_errors() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);

    let err = logger.new_error(4001, &details!["disk"]);
    assert_eq!(err.message_number(), 4001);
    assert_eq!(err.level(), Level::Error);
    assert!(output.is_empty());

    logger.log(2001, &details!["Bob", "Jane", err]);

    let record = output.last_json().unwrap();
    assert_eq!(record["errors"][0]["id"], "4001");
    assert_eq!(record["errors"][0]["text"], "lost disk");
    assert_eq!(record["details"], json!({"1": "Bob", "2": "Jane"}));
}

#[test]
fn json_text_is_embedded() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);

    logger.log(2002, &[Detail::text(r#"{"k":"v"}"#)]);

    assert_eq!(output.last_json().unwrap()["text"], json!({"k": "v"}));
}

#[test]
fn unresolved_level_falls_back() {
    let logger = Logger::builder()
        .level_ranges(msglog::RangeMap::from([(1000, Level::Info)]))
        .build()
        .unwrap();

    let err = logger.resolve_level(5, &[]).unwrap_err();
    assert_eq!(err.fallback, Level::Trace);
    assert_eq!(logger.resolve_level(1500, &[]).unwrap(), Level::Info);
}

#[test]
fn panic_level_panics_after_writing() {
    let output = MemoryOutput::new();
    let logger = Logger::builder()
        .messages([(6001, "out of %s")])
        .output(output.clone())
        .build()
        .unwrap();

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        logger.log(6001, &details!["cheese"]);
    }));

    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("out of cheese"));
    assert_eq!(output.len(), 1);
    let record = output.last_json().unwrap();
    assert_eq!(record["level"], "PANIC");
    assert_eq!(record["text"], "out of cheese");
}

const FATAL_CHILD_ENV: &str = "MSGLOG_TEST_FATAL_CHILD";

/// Runs only inside the subprocess started by `fatal_level_writes_then_exits`.
#[test]
fn fatal_exit_child() {
    if std::env::var_os(FATAL_CHILD_ENV).is_none() {
        return;
    }
    let logger = Logger::builder()
        .messages([(5001, "shutting down")])
        .hide_timestamp(true)
        .without_field(Field::Location)
        .output(WriterOutput::stdout())
        .build()
        .unwrap();
    logger.log(5001, &[]);
    unreachable!("fatal log returned");
}

#[test]
fn fatal_level_writes_then_exits() {
    let out = Command::new(std::env::current_exe().unwrap())
        .args(["fatal_exit_child", "--exact", "--nocapture", "--test-threads=1", "-q"])
        .env(FATAL_CHILD_ENV, "1")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let written: Vec<&str> = stdout.lines().filter(|line| line.starts_with('{')).collect();
    assert_eq!(
        written,
        [r#"{"level":"FATAL","id":"5001","text":"shutting down"}"#]
    );
}

#[test]
fn caller_skips_saturate() {
    let logger = Logger::builder().caller_skip(1).build().unwrap();
    assert_eq!(logger.composer().caller_skip, 1);

    let location = logger
        .record(2001, &[Detail::caller_skip(usize::MAX)])
        .location
        .unwrap();
    assert!(location.starts_with("at "), "{location}");
    assert!(location.contains("logger.rs"), "{location}");
}

#[test]
fn location_points_at_caller() {
    let logger = Logger::builder().build().unwrap();
    let record = logger.record(2001, &[]);
    let location = record.location.unwrap();
    assert!(location.starts_with("at "), "{location}");
    assert!(location.contains("logger.rs"), "{location}");
}

#[test]
fn fields_can_be_selected() {
    let output = MemoryOutput::new();
    let logger = Logger::builder()
        .messages([(2001, "hi")])
        .fields([Field::Level, Field::Text])
        .output(output.clone())
        .build()
        .unwrap();

    logger.log(2001, &details!["x"]);

    assert_eq!(output.lines(), [r#"{"level":"INFO","text":"hi"}"#]);
}

#[test]
fn every_output_receives_the_record() {
    let first = MemoryOutput::new();
    let second = MemoryOutput::new();
    let logger = Logger::builder()
        .output(first.clone())
        .output(second.clone())
        .build()
        .unwrap();

    logger.log(2001, &[]);
    logger.flush().unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first.lines(), second.lines());
}

#[test]
fn concurrent_logging_writes_whole_lines() {
    let output = MemoryOutput::new();
    let logger = logger_with(&output);

    std::thread::scope(|s| {
        for worker in 0..8 {
            let logger = &logger;
            s.spawn(move || {
                for i in 0..50 {
                    logger.log(2001, &details![worker, i]);
                    if i == 25 {
                        logger.set_level(Level::Info);
                    }
                }
            });
        }
    });

    let lines = output.drain();
    assert_eq!(lines.len(), 400);
    for line in lines {
        let record: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(record["level"], "INFO");
    }
    assert!(output.is_empty());
}
