//! # Wordharvest
//!
//! Builds wordlists from the text lying around a filesystem.
//!
//! ## Features
//!
//! - **Recursive discovery**: Every file under a directory whose name ends in one of the
//!   selected extensions (`txt` and `text` by default)
//! - **Word extraction**: Runs of ASCII letters and digits, truncated at 29 characters
//! - **Deduplication**: Each word is written once, in the order it was first found
//! - **Large file support**: Input files are memory-mapped
//! - **Dictionary attack**: The `bruteforce` binary tries a harvested wordlist
//!   against a ZipCrypto-protected ZIP file
//!
//! ## Usage
//!
//! ```bash
//! # Harvest .txt and .text files
//! wordharvest -d ~/documents -o words.txt
//!
//! # Harvest log and config files
//! wordharvest -e log:cfg -d /var/log -o words.txt
//!
//! # Try every harvested word as the password of a ZIP file
//! bruteforce -l words.txt -f secrets.zip
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordharvest::cli::DedupStrategy;
//! use wordharvest::extensions::ExtensionSet;
//! use wordharvest::harvest::{HarvestConfig, Harvester};
//! use std::path::PathBuf;
//!
//! let config = HarvestConfig {
//!     root: PathBuf::from("./documents"),
//!     output: PathBuf::from("words.txt"),
//!     extensions: ExtensionSet::parse("txt:md"),
//!     strategy: DedupStrategy::Buckets,
//!     bucket_count: 100_000,
//!     max_word_len: 29,
//!     buffer_size: 1024 * 1024,
//!     dump_table: false,
//!     quiet: true,
//!     verbose: false,
//! };
//!
//! let harvester = Harvester::new(config).unwrap();
//! // harvester.run().unwrap();
//! ```

pub mod cli;
pub mod crack;
pub mod dedup;
pub mod error;
pub mod extensions;
pub mod extract;
pub mod harvest;
pub mod lister;
pub mod output;
pub mod progress;

pub use cli::{Args, BruteforceArgs};
pub use crack::{CrackOutcome, ZipCracker};
pub use dedup::{BucketTable, Deduplicator};
pub use error::{CrackError, HarvestError};
pub use harvest::{HarvestConfig, Harvester};
pub use lister::{FileLister, MemoryLister, WalkDirLister};
