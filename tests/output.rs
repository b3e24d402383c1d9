//! Tests for output destinations.

use msglog::{Error, Field, Logger, MemoryOutput, WriterOutput, details};
use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn quiet_builder() -> msglog::LoggerBuilder {
    Logger::builder()
        .hide_timestamp(true)
        .without_field(Field::Location)
}

#[test]
fn writer_output_writes_json_lines() {
    let buffer = SharedBuffer::default();
    let logger = quiet_builder()
        .output(WriterOutput::new(buffer.clone()))
        .build()
        .unwrap();

    logger.log(2001, &details!["a"]);
    logger.log(2002, &[]);

    let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert_eq!(
        written,
        "{\"level\":\"INFO\",\"id\":\"2001\",\"details\":{\"1\":\"a\"}}\n{\"level\":\"INFO\",\"id\":\"2002\"}\n"
    );
}

#[test]
fn append_creates_directories_and_appends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("dir").join("out.log");

    for _ in 0..2 {
        let logger = quiet_builder()
            .output(WriterOutput::append(&path).unwrap())
            .build()
            .unwrap();
        logger.log(2001, &[]);
        logger.flush().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn write_failures_surface_through_try_log() {
    let memory = MemoryOutput::new();
    let logger = quiet_builder()
        .output(WriterOutput::new(BrokenPipe))
        .output(memory.clone())
        .build()
        .unwrap();

    assert!(matches!(logger.try_log(2001, &[]), Err(Error::Io(_))));
    // Later outputs still receive the record.
    assert_eq!(memory.len(), 1);

    // Fire-and-forget logging does not panic on the failure.
    logger.log(2001, &[]);
    assert_eq!(memory.len(), 2);
}

#[test]
fn memory_output_drain() {
    let memory = MemoryOutput::new();
    let logger = quiet_builder().output(memory.clone()).build().unwrap();

    logger.log(2001, &[]);
    logger.log(2002, &[]);

    assert_eq!(memory.drain().len(), 2);
    assert!(memory.is_empty());
    assert_eq!(memory.last_json(), None);
}
