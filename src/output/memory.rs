//! Captures serialized records in memory, for tests and for callers that
//! forward log lines themselves.

use super::Output;
use crate::message::MessageRecord;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloning shares the buffer: keep one clone, hand the other to the logger.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of all lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes all lines written so far, leaving the buffer empty.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Most recent line parsed back into JSON.
    #[must_use]
    pub fn last_json(&self) -> Option<serde_json::Value> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .and_then(|line| serde_json::from_str(line).ok())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Output for MemoryOutput {
    fn write(&self, record: &MessageRecord) -> Result<(), crate::Error> {
        let line = record.to_json()?;
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
