//! Output sink for harvested words
//!
//! Append-only, one word per line, buffered. `BufWriter` flushes on drop, so a
//! run that stops early still leaves every word written so far on disk.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for the output file (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Buffered line writer
pub struct OutputWriter<W: Write> {
    writer: BufWriter<W>,
    path: Option<PathBuf>,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter<File> {
    /// Create (or truncate) the output file at `path`
    pub fn create(path: &Path, buffer_size: usize) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let mut writer = Self::from_writer(file, buffer_size);
        writer.path = Some(path.to_path_buf());
        Ok(writer)
    }
}

impl<W: Write> OutputWriter<W> {
    /// Wrap any writer, e.g. an in-memory buffer
    pub fn from_writer(inner: W, buffer_size: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(buffer_size.max(1), inner),
            path: None,
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Append `word` followed by a newline
    pub fn write_line(&mut self, word: &[u8]) -> io::Result<()> {
        self.writer.write_all(word)?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.bytes_written += word.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Path of the output file, when writing to one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
