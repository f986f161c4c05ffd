//! Run-length encoding.
//!
//! The textual form writes each maximal run as its symbol followed by the
//! decimal run count, so `"aaabbbcca"` becomes `"a3b3c2a1"`. That form is
//! ambiguous when the input itself contains decimal digits: a digit symbol
//! right after a count reads as part of the count. [`decode`] therefore only
//! accepts digit-free text, and [`encode`] logs a warning when handed digits.
//! [`encode_runs`] / [`decode_runs`] work on typed runs and are lossless for
//! any alphabet.

use log::{debug, warn};

use super::{Codec, Result, Symbol};
use crate::cs::error::Error;

/// A maximal run of one repeated symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Run<T> {
    pub symbol: T,
    pub count: usize,
}

/// Split `input` into maximal runs.
pub fn encode_runs<T: Symbol>(input: &[T]) -> Vec<Run<T>> {
    let mut runs: Vec<Run<T>> = Vec::new();
    for symbol in input {
        match runs.last_mut() {
            Some(run) if run.symbol == *symbol => run.count += 1,
            _ => runs.push(Run {
                symbol: symbol.clone(),
                count: 1,
            }),
        }
    }
    runs
}

/// Expand runs back into the symbol sequence.
pub fn decode_runs<T: Symbol>(runs: &[Run<T>]) -> Result<Vec<T>> {
    let mut output = Vec::with_capacity(runs.iter().map(|run| run.count).sum());
    for (index, run) in runs.iter().enumerate() {
        if run.count == 0 {
            return Err(Error::MalformedRuns(format!(
                "run {index} of {:?} has a zero count",
                run.symbol
            )));
        }
        output.extend(std::iter::repeat(run.symbol.clone()).take(run.count));
    }
    Ok(output)
}

/// Apply run-length encoding to the input string.
///
/// ```
/// use textcodec::compression::rle;
///
/// assert_eq!(rle::encode("aaabbbcca"), "a3b3c2a1");
/// ```
pub fn encode(input: &str) -> String {
    if input.chars().any(|c| c.is_ascii_digit()) {
        warn!("run-length input contains decimal digits; the encoding cannot be decoded unambiguously");
    }
    let symbols: Vec<char> = input.chars().collect();
    let runs = encode_runs(&symbols);
    let encoded: String = runs
        .iter()
        .map(|run| format!("{}{}", run.symbol, run.count))
        .collect();
    debug!("rle: {} symbols into {} runs", symbols.len(), runs.len());
    encoded
}

/// Decode text produced by [`encode`] from a digit-free input.
///
/// Each run must be a non-digit symbol followed by a positive decimal count.
pub fn decode(encoded: &str) -> Result<String> {
    let mut output = String::new();
    let mut chars = encoded.chars().enumerate().peekable();
    while let Some((position, symbol)) = chars.next() {
        if symbol.is_ascii_digit() {
            return Err(Error::MalformedRuns(format!(
                "expected a symbol at position {position}, found digit {symbol:?}"
            )));
        }
        let mut digits = String::new();
        while let Some((_, digit)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
            digits.push(digit);
        }
        if digits.is_empty() {
            return Err(Error::MalformedRuns(format!(
                "missing count for {symbol:?} at position {position}"
            )));
        }
        let count: usize = digits
            .parse()
            .map_err(|_| Error::MalformedRuns(format!("count {digits} is too large")))?;
        if count == 0 {
            return Err(Error::MalformedRuns(format!(
                "zero count for {symbol:?} at position {position}"
            )));
        }
        output.extend(std::iter::repeat(symbol).take(count));
    }
    Ok(output)
}

/// Run-length codec over typed runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLength;

impl<T: Symbol> Codec<T> for RunLength {
    type Encoded = Vec<Run<T>>;

    fn encode(&self, input: &[T]) -> Result<Vec<Run<T>>> {
        Ok(encode_runs(input))
    }

    fn decode(&self, encoded: &Vec<Run<T>>) -> Result<Vec<T>> {
        decode_runs(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_literal_case() {
        assert_eq!(encode("aaabbbcca"), "a3b3c2a1");
    }

    #[test]
    fn test_encode_edge_cases() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("a"), "a1");
        assert_eq!(encode("abc"), "a1b1c1");
        assert_eq!(encode(&"x".repeat(12)), "x12");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("a3b3c2a1").unwrap(), "aaabbbcca");
        assert_eq!(decode("x12").unwrap(), "x".repeat(12));
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("3a"), Err(Error::MalformedRuns(_))));
        assert!(matches!(decode("ab2"), Err(Error::MalformedRuns(_))));
        assert!(matches!(decode("a0"), Err(Error::MalformedRuns(_))));
        assert!(matches!(
            decode("a99999999999999999999999999"),
            Err(Error::MalformedRuns(_))
        ));
    }

    #[test]
    fn test_digit_alphabet_is_ambiguous() {
        // "a" then "11" encodes as "a1" + "12"; the text form cannot tell.
        assert_eq!(encode("a11"), "a112");
        assert_ne!(decode(&encode("a11")).unwrap(), "a11");
    }

    #[test]
    fn test_typed_runs() {
        let input: Vec<char> = "a11".chars().collect();
        let runs = encode_runs(&input);
        assert_eq!(
            runs,
            vec![
                Run { symbol: 'a', count: 1 },
                Run { symbol: '1', count: 2 },
            ]
        );
        assert_eq!(decode_runs(&runs).unwrap(), input);
    }

    #[test]
    fn test_zero_run_rejected() {
        let runs = vec![Run { symbol: 7u8, count: 0 }];
        assert!(matches!(decode_runs(&runs), Err(Error::MalformedRuns(_))));
    }
}
