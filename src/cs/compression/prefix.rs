//! Prefix-free code tables and the incremental decoder shared by Huffman and
//! Shannon-Fano coding.
//!
//! A code is a string of `'0'` and `'1'` characters. Encoded output carries no
//! embedded table, so decoding needs the exact table the encoder produced.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::{debug, trace};

use super::frequency::FrequencyMap;
use super::{Result, Symbol};
use crate::cs::error::Error;

/// Mapping from symbol to its binary code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<T: Symbol> {
    codes: BTreeMap<T, String>,
}

impl<T: Symbol> Default for CodeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Symbol> CodeTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        CodeTable {
            codes: BTreeMap::new(),
        }
    }

    /// Assign `code` to `symbol`, returning the previous code if any.
    pub fn insert(&mut self, symbol: T, code: impl Into<String>) -> Option<String> {
        self.codes.insert(symbol, code.into())
    }

    /// Returns the code assigned to `symbol`, if any.
    pub fn get(&self, symbol: &T) -> Option<&str> {
        self.codes.get(symbol).map(String::as_str)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in symbol order
    pub fn iter(&self) -> impl Iterator<Item = (&T, &str)> {
        self.codes.iter().map(|(symbol, code)| (symbol, code.as_str()))
    }

    /// Returns true if no code is a prefix of (or equal to) another code.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.sort_unstable();
        // After sorting, any code that prefixes another also prefixes its successor.
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Total encoded length, in binary digits, of an input with these frequencies.
    pub fn encoded_len(&self, frequencies: &FrequencyMap<T>) -> usize {
        frequencies
            .iter()
            .map(|(symbol, count)| self.get(symbol).map_or(0, str::len) * count)
            .sum()
    }

    /// Check that the table can be used to decode unambiguously.
    pub fn validate(&self) -> Result<()> {
        for (symbol, code) in &self.codes {
            if code.is_empty() {
                return Err(Error::InvalidCodeTable(format!(
                    "symbol {symbol:?} has an empty code"
                )));
            }
            if let Some(digit) = code.chars().find(|c| *c != '0' && *c != '1') {
                return Err(Error::InvalidCodeTable(format!(
                    "code {code:?} for {symbol:?} contains non-binary digit {digit:?}"
                )));
            }
        }
        if !self.is_prefix_free() {
            return Err(Error::InvalidCodeTable(
                "table is not prefix-free".to_string(),
            ));
        }
        Ok(())
    }

    /// Concatenate the code of every symbol of `input`.
    pub fn encode(&self, input: &[T]) -> Result<String> {
        let mut bits = String::new();
        for symbol in input {
            let code = self.get(symbol).ok_or_else(|| {
                Error::InvalidInput(format!("symbol {symbol:?} has no code in the table"))
            })?;
            bits.push_str(code);
        }
        Ok(bits)
    }

    /// Decode a string of binary digits with this table.
    ///
    /// Digits are accumulated one at a time; whenever the pending buffer equals
    /// a code, the matching symbol is emitted and the buffer is cleared. Input
    /// that ends with a non-empty buffer is rejected.
    pub fn decode(&self, bits: &str) -> Result<Vec<T>> {
        self.validate()?;
        let lookup: HashMap<&str, &T> = self
            .codes
            .iter()
            .map(|(symbol, code)| (code.as_str(), symbol))
            .collect();
        let longest = self.codes.values().map(String::len).max().unwrap_or(0);

        let mut output = Vec::new();
        let mut pending = String::with_capacity(longest);
        for (position, bit) in bits.chars().enumerate() {
            if bit != '0' && bit != '1' {
                return Err(Error::InvalidInput(format!(
                    "non-binary digit {bit:?} at position {position}"
                )));
            }
            pending.push(bit);
            if let Some(&symbol) = lookup.get(pending.as_str()) {
                trace!("matched {pending} -> {symbol:?}");
                output.push(symbol.clone());
                pending.clear();
            } else if pending.len() >= longest {
                return Err(Error::InvalidInput(format!(
                    "digits {pending:?} ending at position {position} match no code"
                )));
            }
        }
        if !pending.is_empty() {
            return Err(Error::UnmatchedTrailingBits { pending });
        }
        debug!(
            "decoded {} digits into {} symbols",
            bits.len(),
            output.len()
        );
        Ok(output)
    }
}

impl<T: Symbol> FromIterator<(T, String)> for CodeTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, String)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<T: Symbol> fmt::Display for CodeTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, code)) in self.codes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol:?}: '{code}'")?;
        }
        write!(f, "}}")
    }
}

/// Output of a prefix-code encoder: the digit string plus everything needed
/// to display or decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEncoded<T: Symbol> {
    /// Concatenated codes of the input symbols.
    pub bits: String,
    /// The table used to produce `bits`.
    pub table: CodeTable<T>,
    /// Symbol counts of the encoded input.
    pub frequencies: FrequencyMap<T>,
}

impl<T: Symbol> PrefixEncoded<T> {
    /// Decode `bits` with the table produced alongside it.
    pub fn decode(&self) -> Result<Vec<T>> {
        self.table.decode(&self.bits)
    }
}
