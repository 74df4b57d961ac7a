use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::error::Result;
use crate::huffman::FrequencyTable;

/// Counts every character of every line. Line terminators are not symbols.
pub fn count_symbols<R: BufRead>(reader: R) -> Result<FrequencyTable> {
    let mut frequencies = FrequencyTable::new();
    let mut lines = 0usize;

    for line in reader.lines() {
        let line = line?;
        for symbol in line.chars() {
            *frequencies.entry(symbol).or_default() += 1;
        }
        lines += 1;
    }

    trace!("scanned {} lines", lines);
    Ok(frequencies)
}

pub fn count_file(path: &Path) -> Result<FrequencyTable> {
    let file = File::open(path)?;
    let frequencies = count_symbols(BufReader::new(file))?;
    debug!(
        "{}: {} distinct symbols",
        path.display(),
        frequencies.len()
    );
    Ok(frequencies)
}

pub fn count_str(text: &str) -> FrequencyTable {
    let mut frequencies = FrequencyTable::new();
    for symbol in text.lines().flat_map(str::chars) {
        *frequencies.entry(symbol).or_default() += 1;
    }
    frequencies
}
