//! Estimates how much a text file would shrink under Huffman coding.
//!
//! Symbol counts feed a heap-driven tree build, and the resulting prefix codes
//! give the theoretical encoded size. Nothing is ever written out encoded.

pub mod error;
pub mod frequency;
pub mod heap;
pub mod huffman;
pub mod report;

pub use error::{Error, Result};
pub use heap::Heap;
pub use huffman::{CodeTable, FrequencyTable, Huffman, HuffmanNode, create_huffman_tree, derive_codes};
pub use report::{Dictionary, SizeReport, encode_file};
