use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::heap::Heap;

/// Occurrences of each symbol in the scanned text.
pub type FrequencyTable = BTreeMap<char, u64>;

/// Prefix code of each symbol, as a string over `'0'` and `'1'`.
pub type CodeTable = BTreeMap<char, String>;

#[derive(Debug, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        count: u64,
    },
    Internal {
        count: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn new_leaf(symbol: char, count: u64) -> Self {
        HuffmanNode::Leaf { symbol, count }
    }

    pub fn new_internal(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            count: left.count() + right.count(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { count, .. } | HuffmanNode::Internal { count, .. } => *count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Sum of `count * depth` over all leaves, i.e. the encoded length in bits
    /// of the text the tree was built from.
    pub fn weighted_path_length(&self) -> u64 {
        let mut total = 0;
        let mut pending = vec![(self, 0u64)];
        while let Some((node, depth)) = pending.pop() {
            match node {
                HuffmanNode::Leaf { count, .. } => total += count * depth,
                HuffmanNode::Internal { left, right, .. } => {
                    pending.push((&**left, depth + 1));
                    pending.push((&**right, depth + 1));
                }
            }
        }
        total
    }
}

/// Builds an optimal prefix tree by repeatedly merging the two least frequent
/// nodes. The first node taken out becomes the left child.
///
/// Which of several equally frequent nodes is merged first is left to the heap.
pub fn create_huffman_tree(frequencies: &FrequencyTable) -> Result<HuffmanNode> {
    if frequencies.is_empty() {
        return Err(Error::EmptyFrequencyTable);
    }

    let mut pqueue = Heap::with_priority(|a: &HuffmanNode, b: &HuffmanNode| a.count() > b.count());
    pqueue.extend(
        frequencies
            .iter()
            .map(|(&symbol, &count)| HuffmanNode::new_leaf(symbol, count)),
    );

    while pqueue.get_size() > 1 {
        let ln = pqueue.pop_top()?;
        let rn = pqueue.pop_top()?;
        pqueue.insert(HuffmanNode::new_internal(ln, rn));
    }

    let root = pqueue.pop_top()?;
    debug!(
        "built huffman tree over {} symbols, {} occurrences",
        frequencies.len(),
        root.count()
    );
    Ok(root)
}

/// Collects the code of every leaf. A tree made of a single leaf gives that
/// symbol the empty code.
pub fn derive_codes(root: &HuffmanNode) -> CodeTable {
    let mut codes = CodeTable::new();
    fill(root, String::new(), &mut codes);
    codes
}

fn fill(node: &HuffmanNode, code: String, codes: &mut CodeTable) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            let _ = codes.insert(*symbol, code);
        }
        HuffmanNode::Internal { left, right, .. } => {
            fill(left, format!("{}0", code), codes);
            fill(right, format!("{}1", code), codes);
        }
    }
}

/// Walks the tree bit by bit, emitting a symbol and restarting at the root
/// whenever a leaf is reached.
///
/// A single-leaf tree has no bits to walk: only the empty string decodes.
pub fn decode(root: &HuffmanNode, bits: &str) -> Result<String> {
    let mut decoded = String::new();
    let mut current = root;

    for (pos, bit) in bits.chars().enumerate() {
        let HuffmanNode::Internal { left, right, .. } = current else {
            return Err(Error::InvalidCode(pos));
        };
        current = match bit {
            '0' => &**left,
            '1' => &**right,
            _ => return Err(Error::InvalidCode(pos)),
        };

        if let HuffmanNode::Leaf { symbol, .. } = current {
            decoded.push(*symbol);
            current = root;
        }
    }

    if !std::ptr::eq(current, root) {
        return Err(Error::InvalidCode(bits.chars().count()));
    }

    Ok(decoded)
}

/// A built tree together with the codes read off it.
#[derive(Debug)]
pub struct Huffman {
    root: HuffmanNode,
    codes: CodeTable,
}

impl Huffman {
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let root = create_huffman_tree(frequencies)?;
        let codes = derive_codes(&root);
        Ok(Self { root, codes })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn decode(&self, bits: &str) -> Result<String> {
        decode(&self.root, bits)
    }

    pub fn into_root(self) -> HuffmanNode {
        self.root
    }
}
