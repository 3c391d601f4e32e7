//! Wordharvest - unique word harvesting from files
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordharvest::cli::Args;
use wordharvest::harvest::{HarvestConfig, Harvester};
use wordharvest::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging, unless the environment already asks for something
    if std::env::var_os("RUST_LOG").is_none() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else if !args.quiet {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    // Create harvest configuration
    let config = HarvestConfig::from_args(&args)?;

    // Show configuration
    if !args.quiet && args.verbose {
        print_config(&config);
    }

    // Create and run harvester
    let harvester = Harvester::new(config)?;
    let stats = harvester.run()?;

    if !args.quiet {
        stats.print_summary();
    }

    Ok(())
}

/// Print configuration summary
fn print_config(config: &HarvestConfig) {
    print_header("Configuration");

    print_info(&format!("Directory:    {:?}", config.root));
    print_info(&format!("Output:       {:?}", config.output));
    print_info(&format!("Extensions:   {:?}", config.extensions.as_slice()));
    print_info(&format!("Dedup:        {:?}", config.strategy));
    print_info(&format!("Buckets:      {}", config.bucket_count));
    print_info(&format!("Max word len: {}", config.max_word_len));
    print_info(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
}
