//! Symbol frequency counting shared by the entropy coders.

use std::collections::HashMap;
use std::fmt;

use super::Symbol;

/// Occurrence counts keyed by symbol.
///
/// Symbols are kept in first-occurrence order. That order is what the
/// Huffman and Shannon-Fano builders use to break ties between equal
/// frequencies, so it is part of the observable behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<T: Symbol> {
    entries: Vec<(T, usize)>,
    index: HashMap<T, usize>,
}

impl<T: Symbol> Default for FrequencyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Symbol> FrequencyMap<T> {
    /// Create an empty frequency map
    pub fn new() -> Self {
        FrequencyMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count every symbol in `input`
    pub fn from_slice(input: &[T]) -> Self {
        input.iter().cloned().collect()
    }

    /// Record one more occurrence of `symbol`
    pub fn add(&mut self, symbol: T) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Occurrence count of `symbol`, if it was seen at all
    pub fn get(&self, symbol: &T) -> Option<usize> {
        self.index.get(symbol).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate `(symbol, count)` pairs in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }

    /// Symbols sorted by descending count; equal counts keep first-occurrence order.
    pub fn by_descending_frequency(&self) -> Vec<(T, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl<T: Symbol> FromIterator<T> for FrequencyMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for symbol in iter {
            map.add(symbol);
        }
        map
    }
}

impl<T: Symbol> fmt::Display for FrequencyMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol:?}: {count}")?;
        }
        write!(f, "}}")
    }
}

/// Build a frequency map over the characters of `input`.
pub fn char_frequencies(input: &str) -> FrequencyMap<char> {
    input.chars().collect()
}
