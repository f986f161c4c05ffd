//! Text transform and compression algorithms.
//!
//! This module provides implementations of classic textbook codecs over
//! arbitrary symbol sequences:
//! - Burrows-Wheeler transform (forward and inverse)
//! - Run-length encoding
//! - Huffman coding
//! - Shannon-Fano coding
//! - LZ77 sliding-window compression
//!
//! Prefix codes are represented as strings of `'0'` and `'1'` rather than
//! packed bits. Every codec works on `&[T]` for any [`Symbol`] type, with
//! `&str` convenience wrappers operating on `char`.
//!
//! # Examples
//!
//! ```rust
//! use textcodec::compression::{bwt_inverse, bwt_transform, huffman_decode, huffman_encode};
//!
//! let bwt = bwt_transform("banana").unwrap();
//! assert_eq!(bwt.last_column.iter().collect::<String>(), "annb$aa");
//! assert_eq!(bwt_inverse("annb$aa").unwrap(), "banana");
//!
//! let encoded = huffman_encode("mississippi").unwrap();
//! assert_eq!(huffman_decode(&encoded.bits, &encoded.table).unwrap(), "mississippi");
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::cs::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bound shared by every symbol type the codecs accept.
///
/// Symbols must be totally ordered (BWT sorts rotations, code tables are
/// kept sorted) and hashable (frequency counting, code lookup).
pub trait Symbol: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Symbol for T {}

/// Trait for reversible codecs over symbol sequences
pub trait Codec<T: Symbol> {
    /// The encoded representation produced by this codec.
    type Encoded;

    /// Encode the input sequence
    fn encode(&self, input: &[T]) -> Result<Self::Encoded>;

    /// Decode a previously encoded value back into the original sequence
    fn decode(&self, encoded: &Self::Encoded) -> Result<Vec<T>>;
}

pub mod bwt;
pub mod frequency;
pub mod huffman;
pub mod lz77;
pub mod pipeline;
pub mod prefix;
pub mod rle;
pub mod shannon_fano;
pub mod tokens;

pub use bwt::{bwt_inverse, bwt_transform, Bwt, BwtOutput};
pub use frequency::{char_frequencies, FrequencyMap};
pub use huffman::{
    build_code_table, build_huffman_tree, huffman_decode, huffman_encode, Huffman, HuffmanNode,
};
pub use lz77::{lz77_decode, lz77_encode, Lz77, Token};
pub use pipeline::{
    analyze, bwt_rle_huffman, decode_lz77_text, Analysis, AnalyzeOptions, PipelineOutput,
};
pub use prefix::{CodeTable, PrefixEncoded};
pub use rle::{Run, RunLength};
pub use shannon_fano::{shannon_fano_decode, shannon_fano_encode, ShannonFano, SplitStrategy};
