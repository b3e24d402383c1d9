//! JSON lines to any `io::Write`: stderr, stdout, an appended file, or a caller's buffer.

use super::Output;
use crate::internal;
use crate::message::MessageRecord;

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// One shared writer behind a mutex; each record is written and terminated
/// with a newline while the lock is held.
pub struct WriterOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for WriterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterOutput").finish_non_exhaustive()
    }
}

impl WriterOutput {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Appends to `path`, creating it and its parent directories. `~` is expanded.
    ///
    /// # Errors
    /// I/O errors while creating directories or opening the file.
    pub fn append(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = resolve_path(path.as_ref());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
            internal::log(internal::DIRECTORY_CREATED, &[parent.display().to_string().into()]);
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self::new(file))
    }
}

/// Config values use `~` for portability; the OS needs an absolute path.
fn resolve_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.as_ref())
}

impl Output for WriterOutput {
    fn write(&self, record: &MessageRecord) -> Result<(), crate::Error> {
        let line = record.to_json()?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}
