use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use huffsize::frequency::{count_file, count_str};
use huffsize::{Dictionary, Error, encode_file};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn canonical_file() {
    let (huffman, report) = encode_file(&fixture("canonical.txt")).unwrap();

    assert_eq!(huffman.codes().len(), 6);
    assert_eq!(report.original_bytes, 100);
    assert_eq!(report.encoded_bits, 224);
    assert_eq!(report.encoded_bytes, 28);
    assert_eq!(report.percentage, -72);
    assert!(report.to_string().ends_with(" - Difference: -72 bytes (-72%)."));
}

#[test]
fn single_symbol_file() {
    let (huffman, report) = encode_file(&fixture("single.txt")).unwrap();

    assert!(huffman.root().is_leaf());
    assert_eq!(huffman.codes()[&'z'], "");
    assert_eq!(report.original_bytes, 10);
    assert_eq!(report.encoded_bytes, 0);
}

#[test]
fn empty_file_is_an_error() {
    assert!(matches!(
        encode_file(&fixture("empty.txt")),
        Err(Error::EmptyFrequencyTable)
    ));
}

#[test]
fn missing_file_is_an_error() {
    assert!(matches!(
        encode_file(&fixture("does-not-exist.txt")),
        Err(Error::Io(_))
    ));
}

#[test]
fn prose_round_trip() {
    let path = fixture("prose.txt");
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(count_file(&path).unwrap(), count_str(&text));

    let (huffman, report) = encode_file(&path).unwrap();
    let symbols: String = text.lines().collect();
    let bits: String = symbols
        .chars()
        .map(|c| huffman.codes()[&c].as_str())
        .collect();

    assert_eq!(bits.len() as u64, report.encoded_bits);
    assert!(report.encoded_bytes < report.original_bytes);
    assert_eq!(huffman.decode(&bits).unwrap(), symbols);

    let dictionary = Dictionary(huffman.codes()).to_string();
    assert!(dictionary.contains("\n_ :: "));
    assert_eq!(dictionary.lines().count(), huffman.codes().len() + 4);
}

#[test]
fn cli_prints_dictionary_and_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_huffsize"))
        .arg(fixture("canonical.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("---------------------\nGenerated Dictionary:\n"));
    assert!(stdout.contains("f :: "));
    assert!(stdout.contains(" - The Huffman encoded file size would be: 28 bytes."));
}

#[test]
fn cli_without_dictionary() {
    let output = Command::new(env!("CARGO_BIN_EXE_huffsize"))
        .arg("--no-dictionary")
        .arg(fixture("canonical.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Generated Dictionary"));
    assert!(stdout.contains(" - Provided file size: 100 bytes."));
}

#[test]
fn cli_fails_on_empty_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_huffsize"))
        .arg(fixture("empty.txt"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frequency table is empty"));
}
