use std::fmt;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::frequency::count_file;
use crate::huffman::{CodeTable, FrequencyTable, Huffman};

const RULE: &str = "---------------------";

/// Original against Huffman-encoded size, counting one byte per input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original_bytes: u64,
    pub encoded_bits: u64,
    pub encoded_bytes: u64,
    pub saved_bytes: i64,
    /// Relative change, truncated toward zero. Negative means smaller.
    pub percentage: i64,
}

impl SizeReport {
    pub fn new(frequencies: &FrequencyTable, codes: &CodeTable) -> Self {
        let original_bytes: u64 = frequencies.values().sum();
        let encoded_bits: u64 = frequencies
            .iter()
            .map(|(symbol, &count)| count * codes.get(symbol).map_or(0, String::len) as u64)
            .sum();
        let encoded_bytes = encoded_bits.div_ceil(8);

        // trunc((bits / 8 / original - 1) * 100), kept in integers
        let percentage = if original_bytes == 0 {
            0
        } else {
            let original_bits = i128::from(original_bytes) * 8;
            ((i128::from(encoded_bits) - original_bits) * 100 / original_bits) as i64
        };

        SizeReport {
            original_bytes,
            encoded_bits,
            encoded_bytes,
            saved_bytes: original_bytes as i64 - encoded_bytes as i64,
            percentage,
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assuming the characters are ASCII encoded:")?;
        writeln!(f, " - Provided file size: {} bytes.", self.original_bytes)?;
        writeln!(
            f,
            " - The Huffman encoded file size would be: {} bytes.",
            self.encoded_bytes
        )?;
        let sign = if self.saved_bytes >= 0 { '-' } else { '+' };
        write!(
            f,
            " - Difference: {}{} bytes ({}%).",
            sign,
            self.saved_bytes.unsigned_abs(),
            self.percentage
        )
    }
}

/// Prints a code table ordered by code length, shortest first.
pub struct Dictionary<'a>(pub &'a CodeTable);

impl fmt::Display for Dictionary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<_> = self.0.iter().collect();
        sorted.sort_by_key(|(symbol, code)| (code.len(), **symbol));

        writeln!(f, "{RULE}\nGenerated Dictionary:\n{RULE}")?;
        for (&symbol, code) in sorted {
            let symbol = if symbol == ' ' { '_' } else { symbol };
            writeln!(f, "{} :: {}", symbol.escape_debug(), code)?;
        }
        write!(f, "{RULE}")
    }
}

/// Scans `path`, builds its Huffman codes and reports the size they would give.
pub fn encode_file(path: &Path) -> Result<(Huffman, SizeReport)> {
    let frequencies = count_file(path)?;
    let huffman = Huffman::from_frequencies(&frequencies)?;
    let report = SizeReport::new(&frequencies, huffman.codes());
    info!(
        "{}: {} -> {} bytes",
        path.display(),
        report.original_bytes,
        report.encoded_bytes
    );
    Ok((huffman, report))
}
