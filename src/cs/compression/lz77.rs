use log::{debug, trace};

use super::{Codec, Result, Symbol};
use crate::cs::error::Error;

/// Default number of previous symbols searched for a match.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Default cap on the number of symbols a token list may decode to.
pub const DEFAULT_MAX_OUTPUT: usize = 1 << 24;

/// An LZ77 token.
///
/// When a match is found, the token is:
///   (offset, length, next)
///
/// If no match is found, then offset and length are zero, and `next` is the literal.
/// `next` is `None` only when the match runs to the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
    pub offset: usize,
    pub length: usize,
    pub next: Option<T>,
}

impl<T> Token<T> {
    /// A token that copies nothing and emits `symbol`.
    pub fn literal(symbol: T) -> Self {
        Token {
            offset: 0,
            length: 0,
            next: Some(symbol),
        }
    }
}

/// Greedy sliding-window LZ77 compressor.
///
/// The match search is a plain scan over the window, so the cost grows with
/// input length times window size times match length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77 {
    window_size: usize,
    max_match_length: Option<usize>,
    max_output: usize,
}

impl Default for Lz77 {
    fn default() -> Self {
        Self::new()
    }
}

impl Lz77 {
    /// Window of [`DEFAULT_WINDOW_SIZE`] symbols, unbounded match length,
    /// decoding capped at [`DEFAULT_MAX_OUTPUT`] symbols.
    pub fn new() -> Self {
        Lz77 {
            window_size: DEFAULT_WINDOW_SIZE,
            max_match_length: None,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }

    /// Creates a compressor searching at most `window_size` symbols back.
    ///
    /// # Returns
    ///
    /// An error if `window_size` is zero.
    pub fn with_window(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidInput(
                "LZ77 window size must be positive".to_string(),
            ));
        }
        Ok(Lz77 {
            window_size,
            ..Self::new()
        })
    }

    /// Cap the length of any single match.
    pub fn max_match_length(mut self, max: usize) -> Self {
        self.max_match_length = Some(max);
        self
    }

    /// Cap the number of symbols [`Lz77::decode`] may produce.
    pub fn max_output(mut self, limit: usize) -> Self {
        self.max_output = limit;
        self
    }

    /// How many previous symbols the encoder searches.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Compress the input using the LZ77 algorithm.
    ///
    /// At each position every start inside the window is tried; a match may
    /// run past the current position (overlapping itself) as long as symbols
    /// keep agreeing. The longest match wins, and among equally long matches
    /// the farthest one. The scan then advances by `length + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use textcodec::compression::lz77::{Lz77, Token};
    ///
    /// let tokens = Lz77::new().encode(&['a', 'a', 'a', 'a']);
    /// assert_eq!(tokens, vec![
    ///     Token::literal('a'),
    ///     Token { offset: 1, length: 3, next: None },
    /// ]);
    /// ```
    pub fn encode<T: Symbol>(&self, input: &[T]) -> Vec<Token<T>> {
        let mut tokens = Vec::new();
        let end = input.len();
        let mut i = 0;
        while i < end {
            let mut best_length = 0;
            let mut best_offset = 0;
            for j in i.saturating_sub(self.window_size)..i {
                let mut length = 0;
                while i + length < end
                    && self.max_match_length.map_or(true, |max| length < max)
                    && input[j + length] == input[i + length]
                {
                    length += 1;
                }
                if length > best_length {
                    best_length = length;
                    best_offset = i - j;
                }
            }
            let next = input.get(i + best_length).cloned();
            trace!("position {i}: offset {best_offset}, length {best_length}");
            tokens.push(Token {
                offset: best_offset,
                length: best_length,
                next,
            });
            i += best_length + 1;
        }
        debug!(
            "lz77: {} symbols into {} tokens (window {})",
            end,
            tokens.len(),
            self.window_size
        );
        tokens
    }

    /// Decompress a sequence of LZ77 tokens into the original data.
    ///
    /// Copies run one symbol at a time from the growing output, so a token
    /// whose length exceeds its offset repeats the copied symbols. A token
    /// that reaches back before the start of the output, or that would grow
    /// the output past the decode limit, is rejected and no partial output is
    /// returned.
    pub fn decode<T: Symbol>(&self, tokens: &[Token<T>]) -> Result<Vec<T>> {
        let mut output: Vec<T> = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            if token.length > 0 && (token.offset == 0 || token.offset > output.len()) {
                return Err(Error::BackReferenceOutOfRange {
                    token: index,
                    offset: token.offset,
                    length: token.length,
                    available: output.len(),
                });
            }
            let total = output
                .len()
                .checked_add(token.length)
                .and_then(|total| total.checked_add(usize::from(token.next.is_some())));
            if total.map_or(true, |total| total > self.max_output) {
                return Err(Error::OutputTooLarge {
                    token: index,
                    limit: self.max_output,
                });
            }
            if token.length > 0 {
                let start = output.len() - token.offset;
                for k in 0..token.length {
                    let symbol = output[start + k].clone();
                    output.push(symbol);
                }
            }
            if let Some(symbol) = &token.next {
                output.push(symbol.clone());
            }
        }
        Ok(output)
    }
}

impl<T: Symbol> Codec<T> for Lz77 {
    type Encoded = Vec<Token<T>>;

    fn encode(&self, input: &[T]) -> Result<Vec<Token<T>>> {
        Ok(Lz77::encode(self, input))
    }

    fn decode(&self, encoded: &Vec<Token<T>>) -> Result<Vec<T>> {
        Lz77::decode(self, encoded)
    }
}

/// Convenience function: LZ77-encode the characters of `input` with the default window.
pub fn lz77_encode(input: &str) -> Vec<Token<char>> {
    let symbols: Vec<char> = input.chars().collect();
    Lz77::new().encode(&symbols)
}

/// Convenience function: replay character tokens into a string.
pub fn lz77_decode(tokens: &[Token<char>]) -> Result<String> {
    Ok(Lz77::new().decode(tokens)?.into_iter().collect())
}
