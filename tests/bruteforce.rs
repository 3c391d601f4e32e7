use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};
use zip::unstable::write::FileOptionsExt;
use zip::CompressionMethod;

fn bruteforce() -> Command {
    Command::cargo_bin("bruteforce").unwrap()
}

fn write_secret_zip(dir: &Path, password: &str) -> PathBuf {
    let path = dir.join("secrets.zip");
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = FileOptions::<()>::default()
        .compression_method(CompressionMethod::Stored)
        .with_deprecated_encryption(password.as_bytes())
        .unwrap();

    zip.start_file("secrets/accounts.txt", options).unwrap();
    zip.write_all(b"root:hunter2\n").unwrap();
    zip.finish().unwrap();
    path
}

#[test]
fn finds_password_in_dictionary() {
    let dir = TempDir::new().unwrap();
    let archive = write_secret_zip(dir.path(), "falcon");
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "eagle\nhawk\nfalcon\nosprey\n").unwrap();

    bruteforce()
        .arg("-l")
        .arg(&dictionary)
        .arg("-f")
        .arg(&archive)
        .arg("-q")
        .assert()
        .success()
        .stdout("The password is falcon\n");
}

#[test]
fn reports_no_match_when_password_absent() {
    let dir = TempDir::new().unwrap();
    let archive = write_secret_zip(dir.path(), "falcon");
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "eagle\nhawk\nosprey\n").unwrap();

    bruteforce()
        .arg("-l")
        .arg(&dictionary)
        .arg("-f")
        .arg(&archive)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("The password is").not())
        .stdout(predicate::str::contains("Password not found"));
}

#[test]
fn cracks_archive_with_harvested_wordlist() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("old")).unwrap();
    fs::write(docs.join("readme.txt"), "Remember the usual words.").unwrap();
    fs::write(docs.join("old/notes.text"), "vault key: Tangerine42, do not share").unwrap();
    let archive = write_secret_zip(dir.path(), "Tangerine42");
    let wordlist = dir.path().join("words.txt");

    Command::cargo_bin("wordharvest")
        .unwrap()
        .arg("-q")
        .arg("-d")
        .arg(&docs)
        .arg("-o")
        .arg(&wordlist)
        .assert()
        .success();

    bruteforce()
        .arg("-q")
        .arg("-l")
        .arg(&wordlist)
        .arg("-f")
        .arg(&archive)
        .assert()
        .success()
        .stdout("The password is Tangerine42\n");
}

#[test]
fn rejects_file_that_is_not_a_zip() {
    let dir = TempDir::new().unwrap();
    let fake = dir.path().join("fake.zip");
    fs::write(&fake, "just some text").unwrap();
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "anything\n").unwrap();

    bruteforce()
        .arg("-l")
        .arg(&dictionary)
        .arg("-f")
        .arg(&fake)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid ZIP archive"));
}

#[test]
fn missing_dictionary_is_fatal() {
    let dir = TempDir::new().unwrap();
    let archive = write_secret_zip(dir.path(), "falcon");

    bruteforce()
        .arg("-l")
        .arg(dir.path().join("missing.txt"))
        .arg("-f")
        .arg(&archive)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("can't open dictionary file"));
}

#[test]
fn missing_options_fail_with_usage() {
    bruteforce()
        .args(["-l", "words.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
