//! Error types for a harvest run and for the dictionary attack
//!
//! Only [`HarvestError::FileOpen`] is recoverable: the offending file is reported
//! and skipped. Everything else aborts the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("can't open output file {path:?}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't open file {path:?}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing to output")]
    Write(#[from] io::Error),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl HarvestError {
    /// Whether the run may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HarvestError::FileOpen { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;

/// Failures that stop a dictionary attack before any password is tried
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("can't open dictionary file {path:?}")]
    DictionaryOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't open ZIP file {path:?}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a valid ZIP archive")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("archive has no encrypted entries")]
    NotEncrypted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_file_open_is_recoverable() {
        let open = HarvestError::FileOpen {
            path: PathBuf::from("a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(open.is_recoverable());

        let write = HarvestError::Write(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(!write.is_recoverable());

        let config = HarvestError::InvalidConfig { message: "bad".to_string() };
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_crack_error_messages() {
        let err = CrackError::DictionaryOpen {
            path: PathBuf::from("words.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("words.txt"));
        assert_eq!(std::error::Error::source(&err).unwrap().to_string(), "gone");

        let err = CrackError::from(zip::result::ZipError::FileNotFound);
        assert!(err.to_string().contains("ZIP archive"));
    }

    #[test]
    fn test_file_open_keeps_source() {
        let err = HarvestError::FileOpen {
            path: PathBuf::from("a.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "gone");
        assert!(err.to_string().contains("a.txt"));
    }
}
