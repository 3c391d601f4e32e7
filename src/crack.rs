//! Dictionary attack on ZipCrypto-protected ZIP archives
//!
//! Each line of a wordlist is tried as the archive password until one opens
//! every encrypted entry. A candidate is only accepted once the decrypted data
//! passes its CRC check: the ZipCrypto header byte alone lets about one wrong
//! password in 256 through.

use crate::error::CrackError;
use bstr::{BString, ByteSlice};
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Candidate passwords in `dictionary`, one per line, in file order.
///
/// `\n` and `\r\n` terminators are stripped. Blank lines are kept and tried as
/// the empty password.
pub fn candidates(dictionary: &[u8]) -> impl Iterator<Item = &[u8]> {
    dictionary.lines()
}

/// Result of running a dictionary against an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackOutcome {
    Found { password: BString, attempts: u64 },
    Exhausted { attempts: u64 },
}

impl CrackOutcome {
    pub fn attempts(&self) -> u64 {
        match self {
            CrackOutcome::Found { attempts, .. } | CrackOutcome::Exhausted { attempts } => *attempts,
        }
    }
}

/// Password tester over an opened archive
pub struct ZipCracker<R: Read + Seek> {
    archive: ZipArchive<R>,
    encrypted: Vec<usize>,
}

impl ZipCracker<BufReader<File>> {
    /// Open the archive at `path`
    pub fn open(path: &Path) -> Result<Self, CrackError> {
        let file = File::open(path).map_err(|source| CrackError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipCracker<R> {
    pub fn new(reader: R) -> Result<Self, CrackError> {
        let mut archive = ZipArchive::new(reader)?;

        let mut encrypted = Vec::new();
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if entry.encrypted() && !entry.is_dir() {
                encrypted.push(index);
            }
        }

        if encrypted.is_empty() {
            return Err(CrackError::NotEncrypted);
        }

        log::debug!(
            "Archive has {} entries, {} encrypted",
            archive.len(),
            encrypted.len()
        );

        Ok(Self { archive, encrypted })
    }

    /// Number of encrypted file entries a password has to open
    pub fn encrypted_entries(&self) -> usize {
        self.encrypted.len()
    }

    /// Whether `password` decrypts every encrypted entry with a matching CRC
    pub fn try_password(&mut self, password: &[u8]) -> bool {
        for &index in &self.encrypted {
            let mut entry = match self.archive.by_index_decrypt(index, password) {
                Ok(entry) => entry,
                Err(_) => return false,
            };

            if let Err(e) = io::copy(&mut entry, &mut io::sink()) {
                log::trace!("Entry {} rejected candidate: {}", index, e);
                return false;
            }
        }

        true
    }

    /// Try each candidate in order, stopping at the first that opens the archive
    pub fn crack<'a, I>(&mut self, candidates: I, pb: &ProgressBar) -> CrackOutcome
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut attempts = 0;

        for candidate in candidates {
            attempts += 1;
            pb.inc(1);

            if self.try_password(candidate) {
                log::info!("Password found after {} attempts", attempts);
                return CrackOutcome::Found {
                    password: BString::from(candidate),
                    attempts,
                };
            }
        }

        log::info!("Dictionary exhausted after {} attempts", attempts);
        CrackOutcome::Exhausted { attempts }
    }
}
