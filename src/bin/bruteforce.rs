//! Bruteforce - dictionary attack on ZipCrypto-protected ZIP files
//!
//! Companion to `wordharvest`: feed it the harvested wordlist.

use anyhow::Context;
use clap::Parser;
use std::process;
use std::time::Instant;

use wordharvest::cli::BruteforceArgs;
use wordharvest::crack::{candidates, CrackOutcome, ZipCracker};
use wordharvest::error::CrackError;
use wordharvest::extract::FileBytes;
use wordharvest::progress::{
    create_progress_bar, format_duration, format_number, print_error, print_header, print_info,
    print_success, print_warning,
};

use indicatif::ProgressBar;

const EXIT_NOT_FOUND: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let args = BruteforceArgs::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else if !args.quiet {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    match run(&args) {
        Ok(CrackOutcome::Found { password, .. }) => {
            println!("The password is {}", password);
        }
        Ok(CrackOutcome::Exhausted { attempts }) => {
            if !args.quiet {
                print_warning(&format!(
                    "Password not found ({} candidates tried)",
                    format_number(attempts)
                ));
            }
            process::exit(EXIT_NOT_FOUND);
        }
        Err(e) => {
            print_error(&format!("{}", e));
            for cause in e.chain().skip(1) {
                print_error(&format!("  Caused by: {}", cause));
            }
            process::exit(EXIT_ERROR);
        }
    }
}

fn run(args: &BruteforceArgs) -> anyhow::Result<CrackOutcome> {
    let dictionary = FileBytes::open(&args.dictionary).map_err(|source| {
        CrackError::DictionaryOpen {
            path: args.dictionary.clone(),
            source,
        }
    })?;

    let mut cracker = ZipCracker::open(&args.zip_file)
        .with_context(|| format!("can't attack {:?}", args.zip_file))?;

    let total = candidates(&dictionary).count() as u64;

    if !args.quiet {
        print_header("Dictionary attack");
        print_info(&format!("Archive:    {:?}", args.zip_file));
        print_info(&format!("Encrypted:  {} entries", cracker.encrypted_entries()));
        print_info(&format!(
            "Dictionary: {:?} ({} candidates)",
            args.dictionary,
            format_number(total)
        ));
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar(total, "passwords")
    };

    let start = Instant::now();
    let outcome = cracker.crack(candidates(&dictionary), &pb);
    pb.finish_and_clear();

    if !args.quiet {
        if let CrackOutcome::Found { attempts, .. } = &outcome {
            print_success(&format!(
                "Found after {} attempts in {}",
                format_number(*attempts),
                format_duration(start.elapsed())
            ));
        }
    }

    Ok(outcome)
}
