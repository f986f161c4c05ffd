//! Shannon-Fano coding.
//!
//! Distinct symbols are sorted by descending frequency (ties keep
//! first-occurrence order) and the list is split recursively, prepending "0"
//! to every code in the left part and "1" to every code in the right part.
//!
//! The default [`SplitStrategy::Midpoint`] cuts the list at its length
//! midpoint rather than balancing the summed frequencies of the two halves.
//! That is simpler than textbook Shannon-Fano and can give longer output;
//! [`SplitStrategy::BalancedMass`] implements the textbook split.

use log::debug;

use super::frequency::FrequencyMap;
use super::prefix::{CodeTable, PrefixEncoded};
use super::{Codec, Result, Symbol};

/// How a sorted symbol list is divided at each level of the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Split at `len / 2`, ignoring frequencies.
    #[default]
    Midpoint,
    /// Split where the two halves' summed frequencies are closest.
    BalancedMass,
}

impl SplitStrategy {
    /// Index at which to split `symbols`; always in `1..symbols.len()` for
    /// lists of two or more symbols.
    fn split_point<T>(self, symbols: &[(T, usize)]) -> usize {
        match self {
            SplitStrategy::Midpoint => symbols.len() / 2,
            SplitStrategy::BalancedMass => {
                let total: usize = symbols.iter().map(|(_, count)| count).sum();
                let mut left = 0;
                let mut best = (usize::MAX, 1);
                for (i, (_, count)) in symbols[..symbols.len() - 1].iter().enumerate() {
                    left += count;
                    let imbalance = (2 * left).abs_diff(total);
                    if imbalance < best.0 {
                        best = (imbalance, i + 1);
                    }
                }
                best.1
            }
        }
    }
}

/// Shannon-Fano coder over any [`Symbol`] type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShannonFano {
    split: SplitStrategy,
}

impl ShannonFano {
    /// Create a coder using the midpoint split.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `split` to divide symbol lists.
    pub fn split(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    /// The split rule in use.
    pub fn strategy(&self) -> SplitStrategy {
        self.split
    }

    /// Derive a prefix-free code table from symbol frequencies.
    ///
    /// A single-symbol alphabet gets the code "0".
    pub fn build_codes<T: Symbol>(&self, frequencies: &FrequencyMap<T>) -> CodeTable<T> {
        let sorted = frequencies.by_descending_frequency();
        let mut table = CodeTable::new();
        match sorted.as_slice() {
            [] => {}
            [(symbol, _)] => {
                table.insert(symbol.clone(), "0");
            }
            symbols => self.assign(symbols, String::new(), &mut table),
        }
        table
    }

    fn assign<T: Symbol>(&self, symbols: &[(T, usize)], prefix: String, table: &mut CodeTable<T>) {
        if let [(symbol, _)] = symbols {
            table.insert(symbol.clone(), prefix);
            return;
        }
        let (left, right) = symbols.split_at(self.split.split_point(symbols));
        let mut left_prefix = prefix.clone();
        left_prefix.push('0');
        self.assign(left, left_prefix, table);
        let mut right_prefix = prefix;
        right_prefix.push('1');
        self.assign(right, right_prefix, table);
    }

    /// Count symbols, derive the code table and encode `input`.
    ///
    /// Empty input yields empty bits and an empty table.
    pub fn encode<T: Symbol>(&self, input: &[T]) -> Result<PrefixEncoded<T>> {
        let frequencies = FrequencyMap::from_slice(input);
        let table = self.build_codes(&frequencies);
        let bits = table.encode(input)?;
        debug!(
            "shannon-fano ({:?}): {} symbols, {} distinct, {} digits",
            self.split,
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

    /// Decode `bits` using the table returned by [`ShannonFano::encode`].
    pub fn decode<T: Symbol>(&self, bits: &str, table: &CodeTable<T>) -> Result<Vec<T>> {
        table.decode(bits)
    }
}

impl<T: Symbol> Codec<T> for ShannonFano {
    type Encoded = PrefixEncoded<T>;

    fn encode(&self, input: &[T]) -> Result<PrefixEncoded<T>> {
        ShannonFano::encode(self, input)
    }

    fn decode(&self, encoded: &PrefixEncoded<T>) -> Result<Vec<T>> {
        encoded.decode()
    }
}

/// Convenience function: Shannon-Fano encode the characters of `input` with
/// the midpoint split.
pub fn shannon_fano_encode(input: &str) -> Result<PrefixEncoded<char>> {
    let symbols: Vec<char> = input.chars().collect();
    ShannonFano::new().encode(&symbols)
}

/// Convenience function: decode a Shannon-Fano digit string back into text.
pub fn shannon_fano_decode(encoded: &str, table: &CodeTable<char>) -> Result<String> {
    Ok(table.decode(encoded)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_codes() {
        // Sorted: a(3) n(2) b(1); split [a] | [n, b].
        let encoded = shannon_fano_encode("banana").unwrap();
        assert_eq!(encoded.table.get(&'a'), Some("0"));
        assert_eq!(encoded.table.get(&'n'), Some("10"));
        assert_eq!(encoded.table.get(&'b'), Some("11"));
        assert_eq!(encoded.bits, "110100100");
        assert_eq!(shannon_fano_decode(&encoded.bits, &encoded.table).unwrap(), "banana");
    }

    #[test]
    fn test_midpoint_ignores_mass() {
        // Sorted: a(10) b(1) c(1) d(1). Midpoint gives every symbol two digits.
        let input = format!("{}bcd", "a".repeat(10));
        let encoded = shannon_fano_encode(&input).unwrap();
        assert!(encoded.table.iter().all(|(_, code)| code.len() == 2));
        assert_eq!(encoded.bits.len(), 26);
    }

    #[test]
    fn test_balanced_mass_split() {
        let input: Vec<char> = format!("{}bcd", "a".repeat(10)).chars().collect();
        let coder = ShannonFano::new().split(SplitStrategy::BalancedMass);
        let encoded = coder.encode(&input).unwrap();
        assert_eq!(encoded.table.get(&'a'), Some("0"));
        assert_eq!(encoded.bits.len(), 10 + 2 + 3 + 3);
        assert!(encoded.table.is_prefix_free());
        assert_eq!(coder.decode(&encoded.bits, &encoded.table).unwrap(), input);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let encoded = shannon_fano_encode("xyxy").unwrap();
        assert_eq!(encoded.table.get(&'x'), Some("0"));
        assert_eq!(encoded.table.get(&'y'), Some("1"));
    }

    #[test]
    fn test_single_character() {
        let encoded = shannon_fano_encode("zzzz").unwrap();
        assert_eq!(encoded.table.get(&'z'), Some("0"));
        assert_eq!(encoded.bits, "0000");
        assert_eq!(shannon_fano_decode(&encoded.bits, &encoded.table).unwrap(), "zzzz");
    }

    #[test]
    fn test_empty_input() {
        let encoded = shannon_fano_encode("").unwrap();
        assert!(encoded.bits.is_empty());
        assert!(encoded.table.is_empty());
    }

    #[test]
    fn test_prefix_free() {
        for strategy in [SplitStrategy::Midpoint, SplitStrategy::BalancedMass] {
            let input: Vec<char> = "the quick brown fox jumps over the lazy dog".chars().collect();
            let encoded = ShannonFano::new().split(strategy).encode(&input).unwrap();
            assert!(encoded.table.is_prefix_free(), "{strategy:?}");
            assert_eq!(encoded.decode().unwrap(), input);
        }
    }
}
