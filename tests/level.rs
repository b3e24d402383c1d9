//! Tests for log level functionality.

use msglog::Level;

#[test]
fn level_ordering() {
    assert!(Level::Trace < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
    assert!(Level::Error < Level::Fatal);
    assert!(Level::Fatal < Level::Panic);
}

#[test]
fn level_display() {
    assert_eq!(Level::Trace.to_string(), "TRACE");
    assert_eq!(Level::Debug.to_string(), "DEBUG");
    assert_eq!(Level::Info.to_string(), "INFO");
    assert_eq!(Level::Warn.to_string(), "WARN");
    assert_eq!(Level::Error.to_string(), "ERROR");
    assert_eq!(Level::Fatal.to_string(), "FATAL");
    assert_eq!(Level::Panic.to_string(), "PANIC");
}

#[test]
fn level_from_str() {
    assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
    assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!(" fatal ".parse::<Level>().unwrap(), Level::Fatal);
}

#[test]
fn level_from_str_invalid() {
    let err = "BAD-NAME".parse::<Level>().unwrap_err();
    assert_eq!(err.name(), "BAD-NAME");
}

#[test]
fn level_names_round_trip() {
    for level in Level::all() {
        assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        assert_eq!(Level::from_u8(level as u8), Some(level));
    }
    assert_eq!(Level::from_u8(7), None);
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
}
