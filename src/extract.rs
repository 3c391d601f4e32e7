//! Word extraction
//!
//! A word is a maximal run of ASCII letters and digits. Runs longer than the
//! configured maximum keep only their leading `max_len` bytes; the rest of the
//! run is dropped, never emitted as a second word.

use bstr::{BStr, ByteSlice};
use memmap2::Mmap;
use regex::bytes::{Regex, RegexBuilder};
use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;

/// Maximum word length in bytes
pub const MAX_WORD_LEN: usize = 29;

const WORD_PATTERN: &str = "[A-Za-z0-9]+";

/// Contents of a file to harvest
pub enum FileBytes {
    /// Memory-mapped file on disk
    Mapped(Mmap),
    /// Bytes held in memory (empty files, fakes)
    Owned(Vec<u8>),
}

impl FileBytes {
    /// Open and memory-map the file at `path`
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self::Owned(Vec::new()));
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(mmap))
    }
}

impl From<Vec<u8>> for FileBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Owned(bytes)
    }
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Splits byte streams into words
#[derive(Debug, Clone)]
pub struct WordExtractor {
    pattern: Regex,
    max_len: usize,
}

impl WordExtractor {
    pub fn new(max_len: usize) -> anyhow::Result<Self> {
        if max_len == 0 {
            anyhow::bail!("Maximum word length must be at least 1");
        }

        let pattern = RegexBuilder::new(WORD_PATTERN)
            .unicode(false)
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid word pattern '{}': {}", WORD_PATTERN, e))?;

        Ok(Self { pattern, max_len })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Lazily yield the words of `bytes` in order of appearance
    pub fn words<'a>(&'a self, bytes: &'a [u8]) -> impl Iterator<Item = &'a BStr> + 'a {
        self.pattern.find_iter(bytes).map(move |m| {
            let run = m.as_bytes();
            run[..run.len().min(self.max_len)].as_bstr()
        })
    }
}
