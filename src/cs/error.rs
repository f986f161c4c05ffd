//! Error type shared by every codec in the crate.

use thiserror::Error;

/// Errors produced by the transforms and codecs.
///
/// Every variant is a recoverable failure returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The caller supplied an empty input where one was required.
    #[error("input must not be empty")]
    EmptyInput,

    /// A parameter or input violated a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The BWT input already contains the sentinel symbol.
    #[error("input contains the sentinel symbol at position {position}")]
    SentinelCollision { position: usize },

    /// The BWT inverse input has no sentinel symbol.
    #[error("transformed input does not contain the sentinel symbol")]
    MissingSentinel,

    /// The BWT inverse input has more than one sentinel symbol.
    #[error("transformed input contains the sentinel symbol {count} times")]
    AmbiguousSentinel { count: usize },

    /// The BWT inverse input is not the last column of any sorted rotation
    /// table: following it back yields a cycle shorter than the input.
    #[error("input of length {length} is not a valid transform (cycle closes after {cycle} symbols)")]
    InvalidTransform { length: usize, cycle: usize },

    /// A prefix-code stream ended in the middle of a code.
    #[error("encoded stream ended with unmatched bits {pending:?}")]
    UnmatchedTrailingBits { pending: String },

    /// A code table cannot be used for decoding.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// An LZ77 token refers to output that has not been produced yet.
    #[error(
        "token {token} copies {length} symbols from offset {offset} but only {available} are available"
    )]
    BackReferenceOutOfRange {
        token: usize,
        offset: usize,
        length: usize,
        available: usize,
    },

    /// An LZ77 token list would decode to more symbols than allowed.
    #[error("token {token} would grow the output past the limit of {limit} symbols")]
    OutputTooLarge { token: usize, limit: usize },

    /// The textual LZ77 token list is structurally invalid.
    #[error("malformed token list at character {position}: {reason}")]
    MalformedTokens { position: usize, reason: String },

    /// Run-length text that cannot be decoded.
    #[error("malformed run-length data: {0}")]
    MalformedRuns(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
