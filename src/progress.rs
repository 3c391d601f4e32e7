//! Progress display module
//!
//! Status lines, progress bars and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
 ╦ ╦╔═╗╦═╗╔╦╗  ╦ ╦╔═╗╦═╗╦  ╦╔═╗╔═╗╔╦╗
 ║║║║ ║╠╦╝ ║║  ╠═╣╠═╣╠╦╝╚╗╔╝║╣ ╚═╗ ║
 ╚╩╝╚═╝╩╚══╩╝  ╩ ╩╩ ╩╩╚═ ╚╝ ╚═╝╚═╝ ╩
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled progress bar over `total` items, counted as `unit`
pub fn create_progress_bar(total: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} {prefix} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }

    pb.set_prefix(unit.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for a harvest run
#[derive(Debug, Clone)]
pub struct HarvestStats {
    pub files_found: u64,
    pub files_harvested: u64,
    pub files_failed: u64,
    pub bytes_scanned: u64,
    pub words_scanned: u64,
    pub unique_words: u64,
    pub duplicate_words: u64,
    pub start_time: Instant,
}

impl HarvestStats {
    pub fn new() -> Self {
        Self {
            files_found: 0,
            files_harvested: 0,
            files_failed: 0,
            bytes_scanned: 0,
            words_scanned: 0,
            unique_words: 0,
            duplicate_words: 0,
            start_time: Instant::now(),
        }
    }

    pub fn add_files(&mut self, count: usize) {
        self.files_found += count as u64;
    }

    pub fn complete_file(&mut self, size: u64) {
        self.files_harvested += 1;
        self.bytes_scanned += size;
    }

    pub fn fail_file(&mut self) {
        self.files_failed += 1;
    }

    pub fn add_word(&mut self, unique: bool) {
        self.words_scanned += 1;
        if unique {
            self.unique_words += 1;
        } else {
            self.duplicate_words += 1;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.words_scanned as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    HARVEST COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!(
            "  {} {}/{}",
            "Files harvested:".green(),
            self.files_harvested,
            self.files_found
        );
        println!("  {} {}", "Data scanned:   ".green(), ByteSize(self.bytes_scanned));
        if self.files_failed > 0 {
            println!(
                "  {} {}",
                "Unreadable:     ".red(),
                format_number(self.files_failed).red()
            );
        }
        println!();

        println!("  {} {}", "Words scanned:  ".green(), format_number(self.words_scanned));
        println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicate_words));
        println!(
            "  {} {}",
            "Unique output:  ".green().bold(),
            format_number(self.unique_words).green().bold()
        );

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} words/sec", "Throughput:     ".green(), self.words_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for HarvestStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
