//! Error types for the size analysis.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `pop_top`/`get_top` on a heap that holds nothing.
    #[error("heap is empty")]
    EmptyHeap,

    /// A Huffman tree needs at least one symbol.
    #[error("frequency table is empty")]
    EmptyFrequencyTable,

    /// A bit string that does not end on a leaf, or holds something other than '0'/'1'.
    #[error("invalid code bits at position {0}")]
    InvalidCode(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
