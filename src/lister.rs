//! File discovery
//!
//! A [`FileLister`] answers "which files under this root end in `.ext`?" and
//! hands out their contents. The real filesystem is walked with `walkdir`;
//! tests substitute [`MemoryLister`].

use crate::extract::FileBytes;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait FileLister {
    /// Regular files under `root`, recursively, whose name ends in `.<extension>`.
    /// Paths that cannot be traversed are left out silently.
    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf>;

    /// Read the contents of a listed file
    fn open(&self, path: &Path) -> io::Result<FileBytes> {
        FileBytes::open(path)
    }
}

/// True when the final component of `path` ends in `.<extension>`
///
/// Names are compared as raw bytes, so names that are not valid UTF-8 still match.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();
    let extension = extension.as_bytes();
    name.len() > extension.len()
        && name.ends_with(extension)
        && name[name.len() - extension.len() - 1] == b'.'
}

/// Recursive lister over the real filesystem
///
/// Entries are visited in file name order so repeated runs see the same files
/// in the same order. Symbolic links are not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirLister;

impl WalkDirLister {
    pub fn new() -> Self {
        Self
    }
}

impl FileLister for WalkDirLister {
    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf> {
        let walker = WalkDir::new(root).sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable path: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }

        files
    }
}

/// In-memory directory tree
#[derive(Debug, Clone, Default)]
pub struct MemoryLister {
    files: BTreeMap<PathBuf, Option<Vec<u8>>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable file
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), Some(contents.into()));
        self
    }

    /// Add a file that is listed but fails to open
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), None);
        self
    }
}

impl FileLister for MemoryLister {
    fn list(&self, root: &Path, extension: &str) -> Vec<PathBuf> {
        self.files
            .keys()
            .filter(|path| path.starts_with(root) && has_extension(path, extension))
            .cloned()
            .collect()
    }

    fn open(&self, path: &Path) -> io::Result<FileBytes> {
        match self.files.get(path) {
            Some(Some(contents)) => Ok(FileBytes::from(contents.clone())),
            Some(None) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }
}
