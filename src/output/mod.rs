//! Where finished records go. The `Output` trait lets applications plug in their
//! own destinations next to the built-in writer and in-memory backends.

mod memory;
mod writer;

pub use memory::MemoryOutput;
pub use writer::WriterOutput;

use crate::message::MessageRecord;

/// `Send + Sync` so one logger can be shared across threads. Implementations
/// serialize their own writes: two concurrent calls must never interleave.
pub trait Output: Send + Sync {
    /// Writes one record.
    ///
    /// # Errors
    /// I/O or serialization errors from the underlying sink.
    fn write(&self, record: &MessageRecord) -> Result<(), crate::Error>;

    /// Pushes buffered data to the sink.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}
