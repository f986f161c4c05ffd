//! Burrows-Wheeler Transform implementation.
//!
//! The Burrows-Wheeler Transform (BWT) is a reversible transformation that rearranges
//! symbols in a way that makes the data more compressible. A sentinel symbol is
//! appended to the input before rotating; the sentinel sorts before every other
//! symbol and must not already occur in the input, which is what lets the
//! inverse find the original row without a separate index.

use std::cmp::Ordering;

use log::{debug, trace};

use super::{Codec, Result, Symbol};
use crate::cs::error::Error;

/// Default sentinel for character input.
pub const DEFAULT_SENTINEL: char = '$';

/// Result of the forward transform, with the rotation tables kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BwtOutput<T> {
    /// Last symbol of each sorted rotation; contains the sentinel exactly once.
    pub last_column: Vec<T>,
    /// Every rotation of the sentinel-terminated input, in rotation order.
    pub rotations: Vec<Vec<T>>,
    /// The same rotations sorted.
    pub sorted_rotations: Vec<Vec<T>>,
}

impl<T> BwtOutput<T> {
    fn empty() -> Self {
        BwtOutput {
            last_column: Vec::new(),
            rotations: Vec::new(),
            sorted_rotations: Vec::new(),
        }
    }
}

/// Burrows-Wheeler transform with a configurable sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bwt<T> {
    sentinel: T,
}

impl Bwt<char> {
    /// Character transform using `'$'` as the sentinel.
    pub fn new() -> Self {
        Bwt {
            sentinel: DEFAULT_SENTINEL,
        }
    }
}

impl Default for Bwt<char> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Symbol> Bwt<T> {
    /// Creates a transform terminated by `sentinel`, which must not occur in
    /// any input passed to [`Bwt::transform`].
    pub fn with_sentinel(sentinel: T) -> Self {
        Bwt { sentinel }
    }

    /// The end-of-input marker appended before sorting.
    pub fn sentinel(&self) -> &T {
        &self.sentinel
    }

    /// Symbol order with the sentinel forced below everything else.
    fn cmp_symbols(&self, a: &T, b: &T) -> Ordering {
        match (*a == self.sentinel, *b == self.sentinel) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(b),
        }
    }

    fn cmp_rows(&self, a: &[T], b: &[T]) -> Ordering {
        a.iter()
            .zip(b)
            .map(|(x, y)| self.cmp_symbols(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    }

    /// Append the sentinel, rejecting input that already contains it.
    fn terminate(&self, input: &[T]) -> Result<Vec<T>> {
        if let Some(position) = input.iter().position(|s| *s == self.sentinel) {
            return Err(Error::SentinelCollision { position });
        }
        let mut text = Vec::with_capacity(input.len() + 1);
        text.extend_from_slice(input);
        text.push(self.sentinel.clone());
        Ok(text)
    }

    /// Transformed input must carry exactly one sentinel.
    fn check_sentinel(&self, transformed: &[T]) -> Result<()> {
        match transformed.iter().filter(|s| **s == self.sentinel).count() {
            0 => Err(Error::MissingSentinel),
            1 => Ok(()),
            count => Err(Error::AmbiguousSentinel { count }),
        }
    }

    /// Applies the Burrows-Wheeler Transform to the input data.
    ///
    /// # Algorithm
    ///
    /// 1. Append the sentinel.
    /// 2. Form all rotations of the terminated input.
    /// 3. Sort the rotations by full lexicographic comparison.
    /// 4. Take the last symbol of each sorted rotation.
    ///
    /// Empty input gives an empty output.
    ///
    /// # Examples
    ///
    /// ```
    /// use textcodec::compression::bwt::Bwt;
    ///
    /// let input: Vec<char> = "banana".chars().collect();
    /// let output = Bwt::new().transform(&input).unwrap();
    /// assert_eq!(output.last_column.iter().collect::<String>(), "annb$aa");
    /// assert_eq!(output.sorted_rotations.len(), 7);
    /// ```
    pub fn transform(&self, input: &[T]) -> Result<BwtOutput<T>> {
        if input.is_empty() {
            return Ok(BwtOutput::empty());
        }
        let text = self.terminate(input)?;
        let n = text.len();

        let rotations: Vec<Vec<T>> = (0..n)
            .map(|i| text[i..].iter().chain(&text[..i]).cloned().collect())
            .collect();
        let mut sorted_rotations = rotations.clone();
        sorted_rotations.sort_by(|a, b| self.cmp_rows(a, b));

        let last_column: Vec<T> = sorted_rotations
            .iter()
            .filter_map(|rotation| rotation.last().cloned())
            .collect();
        debug!("bwt: transformed {} symbols", input.len());

        Ok(BwtOutput {
            last_column,
            rotations,
            sorted_rotations,
        })
    }

    /// Same last column as [`Bwt::transform`], computed by sorting rotation
    /// start indices instead of materialising every rotation.
    pub fn transform_indexed(&self, input: &[T]) -> Result<Vec<T>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let text = self.terminate(input)?;
        let n = text.len();

        let mut starts: Vec<usize> = (0..n).collect();
        starts.sort_by(|&a, &b| {
            (0..n)
                .map(|k| self.cmp_symbols(&text[(a + k) % n], &text[(b + k) % n]))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        Ok(starts
            .into_iter()
            .map(|start| text[(start + n - 1) % n].clone())
            .collect())
    }

    /// Applies the inverse Burrows-Wheeler Transform to recover the original data.
    ///
    /// # Algorithm
    ///
    /// Starting from a table of `n` empty rows, repeat `n` times: prepend the
    /// `i`-th transformed symbol to row `i`, then sort the table. The rows end
    /// up as the sorted rotations; the one ending in the sentinel is the
    /// original input plus its terminator.
    ///
    /// Each round re-sorts the full table, so the cost is O(n² log n);
    /// [`Bwt::inverse_lf`] gives the same answer in O(n log n).
    pub fn inverse(&self, transformed: &[T]) -> Result<Vec<T>> {
        if transformed.is_empty() {
            return Ok(Vec::new());
        }
        self.check_sentinel(transformed)?;
        let n = transformed.len();

        let mut table: Vec<Vec<T>> = vec![Vec::with_capacity(n); n];
        for round in 0..n {
            for (row, symbol) in table.iter_mut().zip(transformed) {
                row.insert(0, symbol.clone());
            }
            table.sort_by(|a, b| self.cmp_rows(a, b));
            trace!("bwt inverse: round {} of {}", round + 1, n);
        }

        let mut original = table
            .into_iter()
            .find(|row| row.last() == Some(&self.sentinel))
            .ok_or(Error::MissingSentinel)?;
        original.pop();
        // A last column whose LF mapping splits into several cycles yields a
        // periodic row, so the sentinel shows up again inside it.
        if let Some(position) = original.iter().rposition(|s| *s == self.sentinel) {
            return Err(Error::InvalidTransform {
                length: n,
                cycle: n - 1 - position,
            });
        }
        debug!("bwt: inverted {} symbols", original.len());
        Ok(original)
    }

    /// Inverse transform by last-to-first mapping.
    ///
    /// A stable sort of the transformed symbols gives the first column; the
    /// `k`-th symbol of the first column and the symbol it came from in the
    /// last column are the same occurrence. Following that mapping from the
    /// row that starts with the sentinel reads the original input forward.
    pub fn inverse_lf(&self, transformed: &[T]) -> Result<Vec<T>> {
        if transformed.is_empty() {
            return Ok(Vec::new());
        }
        self.check_sentinel(transformed)?;
        let n = transformed.len();

        // order[k] = position in the last column of the k-th first-column symbol.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| self.cmp_symbols(&transformed[a], &transformed[b]));

        let mut original = Vec::with_capacity(n - 1);
        let mut row = 0;
        for step in 1..n {
            row = order[row];
            if row == 0 {
                return Err(Error::InvalidTransform { length: n, cycle: step });
            }
            original.push(transformed[order[row]].clone());
        }
        Ok(original)
    }
}

impl<T: Symbol> Codec<T> for Bwt<T> {
    type Encoded = Vec<T>;

    fn encode(&self, input: &[T]) -> Result<Vec<T>> {
        Ok(self.transform(input)?.last_column)
    }

    fn decode(&self, encoded: &Vec<T>) -> Result<Vec<T>> {
        self.inverse(encoded)
    }
}

/// Convenience function: transform the characters of `input` with the `'$'` sentinel.
pub fn bwt_transform(input: &str) -> Result<BwtOutput<char>> {
    let symbols: Vec<char> = input.chars().collect();
    Bwt::new().transform(&symbols)
}

/// Convenience function: invert a `'$'`-terminated transform back into text.
pub fn bwt_inverse(transformed: &str) -> Result<String> {
    let symbols: Vec<char> = transformed.chars().collect();
    Ok(Bwt::new().inverse(&symbols)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(rows: &[Vec<char>]) -> Vec<String> {
        rows.iter().map(|row| row.iter().collect()).collect()
    }

    #[test]
    fn test_bwt_transform_empty() {
        let output = bwt_transform("").unwrap();
        assert!(output.last_column.is_empty());
        assert!(output.rotations.is_empty());
        assert!(output.sorted_rotations.is_empty());
    }

    #[test]
    fn test_bwt_transform_banana() {
        let output = bwt_transform("banana").unwrap();
        assert_eq!(output.last_column, chars("annb$aa"));
        assert_eq!(
            text(&output.rotations),
            vec!["banana$", "anana$b", "nana$ba", "ana$ban", "na$bana", "a$banan", "$banana"]
        );
        assert_eq!(
            text(&output.sorted_rotations),
            vec!["$banana", "a$banan", "ana$ban", "anana$b", "banana$", "na$bana", "nana$ba"]
        );
    }

    #[test]
    fn test_bwt_transform_mississippi() {
        let output = bwt_transform("mississippi").unwrap();
        assert_eq!(output.last_column, chars("ipssm$pissii"));
    }

    #[test]
    fn test_bwt_transform_single_char() {
        let output = bwt_transform("a").unwrap();
        assert_eq!(output.last_column, chars("a$"));
        assert_eq!(bwt_inverse("a$").unwrap(), "a");
    }

    #[test]
    fn test_bwt_inverse_banana() {
        assert_eq!(bwt_inverse("annb$aa").unwrap(), "banana");
    }

    #[test]
    fn test_bwt_inverse_empty() {
        assert_eq!(bwt_inverse("").unwrap(), "");
    }

    #[test]
    fn test_sentinel_sorts_first_even_below_space() {
        // ' ' orders below '$' as a char; the transform must not care.
        let input = chars("a b!a b");
        let bwt = Bwt::new();
        let output = bwt.transform(&input).unwrap();
        assert_eq!(output.sorted_rotations[0][0], '$');
        assert_eq!(bwt.inverse(&output.last_column).unwrap(), input);
        assert_eq!(bwt.inverse_lf(&output.last_column).unwrap(), input);
    }

    #[test]
    fn test_sentinel_collision() {
        assert_eq!(
            bwt_transform("co$t").unwrap_err(),
            Error::SentinelCollision { position: 2 }
        );
    }

    #[test]
    fn test_inverse_sentinel_checks() {
        assert_eq!(bwt_inverse("annbaa"), Err(Error::MissingSentinel));
        assert_eq!(
            bwt_inverse("a$n$"),
            Err(Error::AmbiguousSentinel { count: 2 })
        );
    }

    #[test]
    fn test_inverse_rejects_invalid_transform() {
        // One sentinel, but no input transforms to these columns.
        let bwt = Bwt::new();
        for (column, cycle) in [("a$a", 2), ("ba$", 2), ("ca$", 2), ("$b", 1), ("aa$b", 3)] {
            let expected = Err(Error::InvalidTransform {
                length: column.chars().count(),
                cycle,
            });
            assert_eq!(bwt.inverse(&chars(column)), expected, "{column}");
            assert_eq!(bwt.inverse_lf(&chars(column)), expected, "{column}");
        }
        assert_eq!(
            bwt_inverse("a$a"),
            Err(Error::InvalidTransform { length: 3, cycle: 2 })
        );
    }

    #[test]
    fn test_custom_sentinel() {
        let bwt = Bwt::with_sentinel(0u8);
        let input = b"abracadabra".to_vec();
        let output = bwt.transform(&input).unwrap();
        assert_eq!(output.last_column.iter().filter(|&&b| b == 0).count(), 1);
        assert_eq!(bwt.inverse(&output.last_column).unwrap(), input);
        assert!(matches!(
            bwt.transform(&[1, 0, 2]),
            Err(Error::SentinelCollision { position: 1 })
        ));
    }

    #[test]
    fn test_indexed_matches_naive() {
        let bwt = Bwt::new();
        for input in ["banana", "mississippi", "abracadabra", "aaaa", "ab ba", "x"] {
            let input = chars(input);
            let naive = bwt.transform(&input).unwrap().last_column;
            assert_eq!(bwt.transform_indexed(&input).unwrap(), naive);
        }
    }

    #[test]
    fn test_lf_matches_naive() {
        let bwt = Bwt::new();
        for input in ["banana", "mississippi", "abracadabra", "aaaa", "ab ba", "x"] {
            let input = chars(input);
            let last = bwt.transform(&input).unwrap().last_column;
            assert_eq!(bwt.inverse_lf(&last).unwrap(), input);
            assert_eq!(bwt.inverse(&last).unwrap(), input);
        }
    }

    #[test]
    fn test_codec_round_trip() {
        let bwt = Bwt::new();
        let input = chars("to be or not to be");
        let encoded = Codec::encode(&bwt, &input).unwrap();
        assert_eq!(Codec::decode(&bwt, &encoded).unwrap(), input);
    }
}
