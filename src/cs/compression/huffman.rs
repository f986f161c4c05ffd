//! Huffman coding.
//!
//! The merge tree is built with a min-priority queue over node frequencies.
//! Ties are broken by creation order: leaves are numbered in the
//! first-occurrence order of their symbols, and each merged node gets the next
//! number after every existing node. The first node removed from the queue
//! becomes the left child ("0"), the second the right child ("1"). Tie order
//! changes which code a symbol receives but never the total encoded length.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::frequency::FrequencyMap;
use super::prefix::{CodeTable, PrefixEncoded};
use super::{Codec, Result, Symbol};

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<T: Symbol> {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: T, freq: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: usize,
        left: Box<HuffmanNode<T>>,
        right: Box<HuffmanNode<T>>,
    },
}

impl<T: Symbol> HuffmanNode<T> {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }
}

/// Queue entry ordering nodes so that the smallest frequency, then the
/// earliest created node, has the highest priority.
#[derive(Debug)]
struct Pending<T: Symbol> {
    seq: usize,
    node: Box<HuffmanNode<T>>,
}

impl<T: Symbol> Pending<T> {
    fn key(&self) -> (usize, usize) {
        (self.node.freq(), self.seq)
    }
}

impl<T: Symbol> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T: Symbol> Eq for Pending<T> {}

impl<T: Symbol> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: BinaryHeap is a max-heap.
        other.key().cmp(&self.key())
    }
}

impl<T: Symbol> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree given a frequency table.
/// Returns `None` if the frequency table is empty.
pub fn build_huffman_tree<T: Symbol>(freq_table: &FrequencyMap<T>) -> Option<HuffmanNode<T>> {
    let mut heap: BinaryHeap<Pending<T>> = freq_table
        .iter()
        .enumerate()
        .map(|(seq, (symbol, freq))| Pending {
            seq,
            node: Box::new(HuffmanNode::Leaf {
                symbol: symbol.clone(),
                freq,
            }),
        })
        .collect();

    let mut next_seq = heap.len();
    loop {
        let left = heap.pop()?;
        let Some(right) = heap.pop() else {
            return Some(*left.node);
        };
        let internal = HuffmanNode::Internal {
            freq: left.node.freq() + right.node.freq(),
            left: left.node,
            right: right.node,
        };
        heap.push(Pending {
            seq: next_seq,
            node: Box::new(internal),
        });
        next_seq += 1;
    }
}

/// Recursively build the code table mapping symbols to their Huffman codes.
///
/// If the tree consists of a single leaf (i.e. one unique symbol), the code "0" is assigned.
pub fn build_code_table<T: Symbol>(node: &HuffmanNode<T>) -> CodeTable<T> {
    let mut table = CodeTable::new();
    build_code_table_helper(node, String::new(), &mut table);
    table
}

fn build_code_table_helper<T: Symbol>(
    node: &HuffmanNode<T>,
    prefix: String,
    table: &mut CodeTable<T>,
) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            let code = if prefix.is_empty() {
                "0".to_string()
            } else {
                prefix
            };
            table.insert(symbol.clone(), code);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            build_code_table_helper(left, left_prefix, table);
            let mut right_prefix = prefix;
            right_prefix.push('1');
            build_code_table_helper(right, right_prefix, table);
        }
    }
}

/// Huffman coder over any [`Symbol`] type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Huffman {
    /// Creates a Huffman coder; it carries no configuration.
    pub fn new() -> Self {
        Huffman
    }

    /// Count symbols, build the tree, derive the code table and encode `input`.
    ///
    /// Empty input yields empty bits and an empty table.
    pub fn encode<T: Symbol>(&self, input: &[T]) -> Result<PrefixEncoded<T>> {
        let frequencies = FrequencyMap::from_slice(input);
        // The tree only lives long enough to extract the table.
        let table = match build_huffman_tree(&frequencies) {
            Some(tree) => build_code_table(&tree),
            None => CodeTable::new(),
        };
        let bits = table.encode(input)?;
        debug!(
            "huffman: {} symbols, {} distinct, {} digits",
            input.len(),
            frequencies.len(),
            bits.len()
        );
        Ok(PrefixEncoded {
            bits,
            table,
            frequencies,
        })
    }

    /// Decode `bits` using the table returned by [`Huffman::encode`].
    pub fn decode<T: Symbol>(&self, bits: &str, table: &CodeTable<T>) -> Result<Vec<T>> {
        table.decode(bits)
    }
}

impl<T: Symbol> Codec<T> for Huffman {
    type Encoded = PrefixEncoded<T>;

    fn encode(&self, input: &[T]) -> Result<PrefixEncoded<T>> {
        Huffman::encode(self, input)
    }

    fn decode(&self, encoded: &PrefixEncoded<T>) -> Result<Vec<T>> {
        encoded.decode()
    }
}

/// Convenience function: Huffman-encode the characters of `input`.
pub fn huffman_encode(input: &str) -> Result<PrefixEncoded<char>> {
    let symbols: Vec<char> = input.chars().collect();
    Huffman.encode(&symbols)
}

/// Convenience function: decode a Huffman digit string back into text.
pub fn huffman_decode(encoded: &str, table: &CodeTable<char>) -> Result<String> {
    Ok(table.decode(encoded)?.into_iter().collect())
}
