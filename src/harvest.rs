//! Core harvesting engine
//!
//! Walks every configured extension in order, extracts words from each matching
//! file and appends words seen for the first time to the output.

use crate::cli::{Args, DedupStrategy};
use crate::dedup::{create_deduplicator, Deduplicator};
use crate::error::{HarvestError, Result};
use crate::extensions::ExtensionSet;
use crate::extract::WordExtractor;
use crate::lister::{FileLister, WalkDirLister};
use crate::output::OutputWriter;
use crate::progress::{
    create_progress_bar, print_error, print_header, print_success, print_warning, HarvestStats,
};

use colored::*;
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Harvest configuration
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub extensions: ExtensionSet,
    pub strategy: DedupStrategy,
    pub bucket_count: usize,
    pub max_word_len: usize,
    pub buffer_size: usize,
    pub dump_table: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl HarvestConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let config = Self {
            root: args.directory.clone(),
            output: args.output.clone(),
            extensions: args.get_extensions(),
            strategy: args.dedup_strategy,
            bucket_count: args.bucket_count,
            max_word_len: args.max_word_length,
            buffer_size: args.parse_buffer_size()?,
            dump_table: args.dump_table,
            quiet: args.quiet,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(HarvestError::InvalidConfig {
                message: "bucket count must be at least 1".to_string(),
            });
        }
        if self.max_word_len == 0 {
            return Err(HarvestError::InvalidConfig {
                message: "maximum word length must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Main harvester
pub struct Harvester<L: FileLister = WalkDirLister> {
    config: HarvestConfig,
    lister: L,
    extractor: WordExtractor,
}

impl Harvester<WalkDirLister> {
    /// Harvester over the real filesystem
    pub fn new(config: HarvestConfig) -> anyhow::Result<Self> {
        Self::with_lister(config, WalkDirLister::new())
    }
}

impl<L: FileLister> Harvester<L> {
    pub fn with_lister(config: HarvestConfig, lister: L) -> anyhow::Result<Self> {
        config.validate()?;
        let extractor = WordExtractor::new(config.max_word_len)?;
        Ok(Self {
            config,
            lister,
            extractor,
        })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Run a complete harvest into the configured output file
    pub fn run(&self) -> anyhow::Result<HarvestStats> {
        let output_path = &self.config.output;
        let mut output = OutputWriter::create(output_path, self.config.buffer_size).map_err(
            |source| HarvestError::OutputOpen {
                path: output_path.clone(),
                source,
            },
        )?;

        if !self.config.root.is_dir() {
            log::warn!("Search directory {:?} is not a readable directory", self.config.root);
            if !self.config.quiet {
                print_warning(&format!("Search directory not found: {:?}", self.config.root));
            }
        }

        let mut dedup = create_deduplicator(self.config.strategy, self.config.bucket_count);
        let stats = self.harvest(dedup.as_mut(), &mut output)?;
        output.flush().map_err(HarvestError::Write)?;

        log::debug!(
            "Deduplication table: {} words, ~{} bytes",
            dedup.len(),
            dedup.memory_usage()
        );

        if self.config.dump_table {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            dedup.dump(&mut lock).map_err(HarvestError::Write)?;
            lock.flush().map_err(HarvestError::Write)?;
        }

        dedup.clear();

        if !self.config.quiet {
            print_success(&format!(
                "Output written to: {:?} ({} unique words)",
                output_path,
                output.lines_written()
            ));
        }

        Ok(stats)
    }

    /// Harvest every configured extension into `output`, using `dedup` to
    /// remember words already written.
    pub fn harvest<W: Write>(
        &self,
        dedup: &mut dyn Deduplicator,
        output: &mut OutputWriter<W>,
    ) -> Result<HarvestStats> {
        let mut stats = HarvestStats::new();

        if self.config.extensions.is_empty() {
            log::warn!("No extensions configured, nothing to harvest");
        }

        for extension in self.config.extensions.iter() {
            let files = self.lister.list(&self.config.root, extension);
            stats.add_files(files.len());
            log::info!("Found {} '.{}' files under {:?}", files.len(), extension, self.config.root);

            if !self.config.quiet {
                print_header(&format!("Harvesting .{} files...", extension));
            }

            let pb = if self.config.quiet {
                ProgressBar::hidden()
            } else {
                create_progress_bar(files.len() as u64, "files")
            };

            for path in &files {
                if self.config.verbose {
                    pb.set_message(format!("{:?}", path.file_name().unwrap_or_default()));
                }

                match self.harvest_file(path, dedup, output, &mut stats) {
                    Ok(()) => {}
                    Err(e) if e.is_recoverable() => {
                        log::debug!("{:?}", e);
                        pb.suspend(|| print_error(&format!("{}: {}", e, error_source(&e))));
                        stats.fail_file();
                    }
                    Err(e) => return Err(e),
                }

                pb.inc(1);
            }

            pb.finish_with_message("Complete".green().to_string());
        }

        Ok(stats)
    }

    /// Harvest a single file
    pub fn harvest_file<W: Write>(
        &self,
        path: &Path,
        dedup: &mut dyn Deduplicator,
        output: &mut OutputWriter<W>,
        stats: &mut HarvestStats,
    ) -> Result<()> {
        let bytes = self
            .lister
            .open(path)
            .map_err(|source| HarvestError::FileOpen {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Harvesting {:?} ({} bytes)", path, bytes.len());

        for word in self.extractor.words(&bytes) {
            let unique = dedup.contains_or_insert(word);
            if unique {
                output.write_line(word)?;
            }
            stats.add_word(unique);
        }

        stats.complete_file(bytes.len() as u64);
        Ok(())
    }
}

fn error_source(e: &HarvestError) -> String {
    std::error::Error::source(e)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::BucketTable;
    use crate::lister::MemoryLister;

    fn config(extensions: &str) -> HarvestConfig {
        HarvestConfig {
            root: PathBuf::from("/data"),
            output: PathBuf::from("/unused"),
            extensions: if extensions.is_empty() {
                ExtensionSet::default()
            } else {
                ExtensionSet::parse(extensions)
            },
            strategy: DedupStrategy::Buckets,
            bucket_count: 1000,
            max_word_len: 29,
            buffer_size: 1024,
            dump_table: false,
            quiet: true,
            verbose: false,
        }
    }

    fn harvest_to_string(harvester: &Harvester<MemoryLister>) -> (String, HarvestStats) {
        let mut table = BucketTable::new(harvester.config().bucket_count);
        let mut output = OutputWriter::from_writer(Vec::new(), 64);
        let stats = harvester.harvest(&mut table, &mut output).unwrap();
        let bytes = output.into_inner().unwrap();
        (String::from_utf8(bytes).unwrap(), stats)
    }

    #[test]
    fn test_words_written_once_in_discovery_order() {
        let lister = MemoryLister::new()
            .with_file("/data/a.txt", "foo bar foo")
            .with_file("/data/b.txt", "bar baz");
        let harvester = Harvester::with_lister(config(""), lister).unwrap();

        let (output, stats) = harvest_to_string(&harvester);
        assert_eq!(output, "foo\nbar\nbaz\n");
        assert_eq!(stats.words_scanned, 5);
        assert_eq!(stats.unique_words, 3);
        assert_eq!(stats.duplicate_words, 2);
        assert_eq!(stats.files_harvested, 2);
    }

    #[test]
    fn test_extensions_are_visited_in_order() {
        let lister = MemoryLister::new()
            .with_file("/data/a.text", "second")
            .with_file("/data/z.txt", "first");
        let harvester = Harvester::with_lister(config("txt:text"), lister).unwrap();

        let (output, _) = harvest_to_string(&harvester);
        assert_eq!(output, "first\nsecond\n");
    }

    #[test]
    fn test_only_selected_extensions_harvested() {
        let lister = MemoryLister::new()
            .with_file("/data/x.log", "logword")
            .with_file("/data/y.cfg", "cfgword")
            .with_file("/data/z.txt", "txtword");
        let harvester = Harvester::with_lister(config("log:cfg"), lister).unwrap();

        let (output, stats) = harvest_to_string(&harvester);
        assert_eq!(output, "logword\ncfgword\n");
        assert_eq!(stats.files_found, 2);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let lister = MemoryLister::new()
            .with_file("/data/a.txt", "alpha")
            .with_unreadable("/data/b.txt")
            .with_file("/data/c.txt", "gamma alpha");
        let harvester = Harvester::with_lister(config("txt"), lister).unwrap();

        let (output, stats) = harvest_to_string(&harvester);
        assert_eq!(output, "alpha\ngamma\n");
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.files_harvested, 2);
    }

    #[test]
    fn test_truncated_word_is_single_entry() {
        let lister = MemoryLister::new()
            .with_file("/data/a.txt", "abcdefghijklmnopqrstuvwxyz12345");
        let harvester = Harvester::with_lister(config("txt"), lister).unwrap();

        let (output, _) = harvest_to_string(&harvester);
        assert_eq!(output, "abcdefghijklmnopqrstuvwxyz123\n");
    }

    #[test]
    fn test_table_shared_across_runs_suppresses_repeats() {
        let lister = MemoryLister::new().with_file("/data/a.txt", "one two");
        let harvester = Harvester::with_lister(config("txt"), lister).unwrap();

        let mut table = BucketTable::new(10);
        let mut first = OutputWriter::from_writer(Vec::new(), 64);
        harvester.harvest(&mut table, &mut first).unwrap();
        let mut second = OutputWriter::from_writer(Vec::new(), 64);
        harvester.harvest(&mut table, &mut second).unwrap();

        assert_eq!(first.into_inner().unwrap(), b"one\ntwo\n");
        assert!(second.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config("txt");
        bad.bucket_count = 0;
        assert!(Harvester::with_lister(bad, MemoryLister::new()).is_err());

        let mut bad = config("txt");
        bad.max_word_len = 0;
        assert!(bad.validate().is_err());
    }
}
