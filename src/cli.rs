//! Command-line interface definition for wordharvest
//!
//! Provides argument parsing and validation for the word harvesting tool.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::dedup::DEFAULT_BUCKET_COUNT;
use crate::extensions::ExtensionSet;
use crate::extract::MAX_WORD_LEN;

/// Harvest unique words from files into a wordlist
///
/// Searches a directory tree for files with the given extensions, extracts
/// alphanumeric words from them and writes each distinct word once.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordharvest",
    version,
    about = "Harvest unique alphanumeric words from files into a wordlist",
    long_about = r#"
Searches DIR recursively for files with the given extensions, extracts words
(runs of ASCII letters and digits, at most 29 characters) and writes every
distinct word once to OUTFILE, in the order it was first found.

EXAMPLES:
    # Harvest .txt and .text files (the default)
    wordharvest -d ~/documents -o words.txt

    # Harvest log and config files
    wordharvest -e log:cfg -d /var/log -o words.txt

    # Use a growable hash set instead of the fixed bucket table
    wordharvest -d src -o words.txt -e rs --dedup-strategy hashset
"#
)]
pub struct Args {
    /// Directory to search
    #[arg(short = 'd', long = "directory", required = true, value_name = "DIR")]
    pub directory: PathBuf,

    /// Output file for the wordlist (created or truncated)
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTFILE")]
    pub output: PathBuf,

    /// Colon-separated file extensions, at most 4 characters each (default: txt:text)
    #[arg(short = 'e', long = "extensions", value_name = "EXT1:EXT2:...")]
    pub extensions: Vec<String>,

    /// Deduplication strategy
    #[arg(long, value_enum, default_value_t = DedupStrategy::Buckets)]
    pub dedup_strategy: DedupStrategy,

    /// Number of buckets in the hash table
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_BUCKET_COUNT)]
    pub bucket_count: usize,

    /// Maximum word length; longer runs are truncated
    #[arg(long, value_name = "NUM", default_value_t = MAX_WORD_LEN)]
    pub max_word_length: usize,

    /// Buffer size for the output file (e.g. "64KB", "1MB")
    #[arg(long, value_name = "SIZE", default_value = "1MB")]
    pub buffer_size: String,

    /// Print the hash table contents to stdout after harvesting
    #[arg(long, default_value_t = false)]
    pub dump_table: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Dictionary attack on a ZIP file protected with ZipCrypto
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bruteforce",
    version,
    about = "Brute-force dictionary attack for a ZIP file",
    long_about = r#"
Tries every line of DICTIONARY as the password of ZIPFILE and prints the first
one that decrypts every encrypted entry. Only ZipCrypto (the legacy "zip -e"
encryption) is supported.

Exit status is 0 when the password is found, 1 when the dictionary is
exhausted and 2 on errors.

EXAMPLES:
    wordharvest -d ~/documents -o words.txt
    bruteforce -l words.txt -f secrets.zip
"#
)]
pub struct BruteforceArgs {
    /// Dictionary file, one candidate password per line
    #[arg(short = 'l', long = "dictionary", required = true, value_name = "FILE")]
    pub dictionary: PathBuf,

    /// ZIP file to attack
    #[arg(short = 'f', long = "file", required = true, value_name = "FILE")]
    pub zip_file: PathBuf,

    /// Quiet mode - print only the password
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// How seen words are remembered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupStrategy {
    /// Fixed bucket count, chained collisions
    Buckets,
    /// Growable hash set
    Hashset,
}

impl Args {
    /// Extensions to harvest, in order
    pub fn get_extensions(&self) -> ExtensionSet {
        ExtensionSet::from_specs(&self.extensions)
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }
}

/// Largest accepted output buffer (256MB)
pub const MAX_BUFFER_SIZE: usize = 256 * 1024 * 1024;

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier): (&str, usize) = if let Some(num) = size_str.strip_suffix("GB") {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("MB") {
        (num, 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("KB") {
        (num, 1024)
    } else if let Some(num) = size_str.strip_suffix('B') {
        (num, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    let bytes = num
        .checked_mul(multiplier)
        .filter(|&bytes| bytes <= MAX_BUFFER_SIZE)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Size '{}' exceeds the maximum of {}",
                size_str,
                bytesize::ByteSize(MAX_BUFFER_SIZE as u64)
            )
        })?;

    Ok(bytes)
}
