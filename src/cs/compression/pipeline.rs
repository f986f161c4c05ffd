//! Composition of the codecs and the request/response entry points used by
//! front ends.
//!
//! [`analyze`] runs every encoder on one string and collects the results for
//! display; [`decode_lz77_text`] parses and replays a textual token list.
//! Both reject empty input, which the core codecs otherwise accept.

use std::fmt;

use log::info;

use super::bwt::{Bwt, BwtOutput, DEFAULT_SENTINEL};
use super::huffman::Huffman;
use super::lz77::{self, Lz77, Token};
use super::prefix::PrefixEncoded;
use super::shannon_fano::{ShannonFano, SplitStrategy};
use super::{rle, tokens, Result};
use crate::cs::error::Error;

/// Parameters for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// LZ77 search window.
    pub window_size: usize,
    /// BWT sentinel; must not occur in the input.
    pub sentinel: char,
    /// Shannon-Fano split rule.
    pub split: SplitStrategy,
    /// Run independent codecs on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            window_size: lz77::DEFAULT_WINDOW_SIZE,
            sentinel: DEFAULT_SENTINEL,
            split: SplitStrategy::default(),
            parallel: true,
        }
    }
}

/// Every encoder's view of one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub input: String,
    pub bwt: BwtOutput<char>,
    /// The inverse transform of `bwt.last_column`; equals `input`.
    pub bwt_inverse: String,
    /// Run-length encoding of the BWT output.
    pub rle: String,
    pub huffman: PrefixEncoded<char>,
    pub shannon_fano: PrefixEncoded<char>,
    pub lz77: Vec<Token<char>>,
}

/// Transform, inverse and run-length stage of [`analyze`].
fn bwt_stage(symbols: &[char], sentinel: char) -> Result<(BwtOutput<char>, String, String)> {
    let bwt = Bwt::with_sentinel(sentinel);
    let output = bwt.transform(symbols)?;
    let inverse: String = bwt.inverse(&output.last_column)?.into_iter().collect();
    let last_column: String = output.last_column.iter().collect();
    let runs = rle::encode(&last_column);
    Ok((output, inverse, runs))
}

/// Run every encoder on `input`.
///
/// Empty input is rejected with [`Error::EmptyInput`].
pub fn analyze(input: &str, options: &AnalyzeOptions) -> Result<Analysis> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let symbols: Vec<char> = input.chars().collect();
    let lz = Lz77::with_window(options.window_size)?;
    let shannon_fano = ShannonFano::new().split(options.split);

    let bwt = || bwt_stage(&symbols, options.sentinel);
    let huffman = || Huffman.encode(&symbols);
    let sf = || shannon_fano.encode(&symbols);
    let lz77 = || lz.encode(&symbols);

    let ((bwt, huffman), (shannon_fano, lz77)) = if options.parallel {
        rayon::join(|| rayon::join(bwt, huffman), || rayon::join(sf, lz77))
    } else {
        ((bwt(), huffman()), (sf(), lz77()))
    };
    let (bwt, bwt_inverse, rle) = bwt?;
    info!(
        "analyzed {} symbols: huffman {} digits, shannon-fano {} digits, {} lz77 tokens",
        symbols.len(),
        huffman.as_ref().map_or(0, |h| h.bits.len()),
        shannon_fano.as_ref().map_or(0, |s| s.bits.len()),
        lz77.len()
    );

    Ok(Analysis {
        input: input.to_string(),
        bwt,
        bwt_inverse,
        rle,
        huffman: huffman?,
        shannon_fano: shannon_fano?,
        lz77,
    })
}

/// Parse a textual token list and replay it.
///
/// Structural problems are reported as [`Error::MalformedTokens`] before any
/// token is replayed.
pub fn decode_lz77_text(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let tokens = tokens::parse(text)?;
    lz77::lz77_decode(&tokens)
}

/// Result of chaining BWT, run-length encoding and Huffman coding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub sentinel: char,
    /// Last column of the transform.
    pub bwt: String,
    /// Run-length text of `bwt`.
    pub rle: String,
    /// Huffman coding of the characters of `rle`.
    pub huffman: PrefixEncoded<char>,
}

impl PipelineOutput {
    /// Undo the chain: Huffman decode, run-length decode, inverse transform.
    ///
    /// Fails with [`Error::MalformedRuns`] if the input contained decimal
    /// digits, since the run-length text is then ambiguous.
    pub fn decode(&self) -> Result<String> {
        let rle: String = self.huffman.decode()?.into_iter().collect();
        let bwt: Vec<char> = rle::decode(&rle)?.chars().collect();
        Ok(Bwt::with_sentinel(self.sentinel)
            .inverse(&bwt)?
            .into_iter()
            .collect())
    }
}

/// BWT → RLE → Huffman over the characters of `input`.
pub fn bwt_rle_huffman(input: &str, sentinel: char) -> Result<PipelineOutput> {
    let symbols: Vec<char> = input.chars().collect();
    let bwt: String = Bwt::with_sentinel(sentinel)
        .transform(&symbols)?
        .last_column
        .into_iter()
        .collect();
    let rle = rle::encode(&bwt);
    let rle_symbols: Vec<char> = rle.chars().collect();
    let huffman = Huffman.encode(&rle_symbols)?;
    Ok(PipelineOutput {
        sentinel,
        bwt,
        rle,
        huffman,
    })
}

fn rows(rows: &[Vec<char>]) -> Vec<String> {
    rows.iter().map(|row| row.iter().collect()).collect()
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_column: String = self.bwt.last_column.iter().collect();
        writeln!(f, "=== Burrows-Wheeler Transform (BWT) ===")?;
        writeln!(f, "Rotations: {:?}", rows(&self.bwt.rotations))?;
        writeln!(f, "Sorted Rotations: {:?}", rows(&self.bwt.sorted_rotations))?;
        writeln!(f, "BWT Output: {last_column}")?;
        writeln!(f, "Decoded String: {}", self.bwt_inverse)?;
        writeln!(f)?;
        writeln!(f, "=== Run-Length Encoding (RLE) ===")?;
        writeln!(f, "RLE Output: {}", self.rle)?;
        writeln!(f)?;
        writeln!(f, "=== Huffman Coding ===")?;
        writeln!(f, "Frequency Map: {}", self.huffman.frequencies)?;
        writeln!(f, "Huffman Codes: {}", self.huffman.table)?;
        writeln!(f, "Encoded Output: {}", self.huffman.bits)?;
        writeln!(f)?;
        writeln!(f, "=== Shannon-Fano Coding ===")?;
        writeln!(f, "Frequency Map: {}", self.shannon_fano.frequencies)?;
        writeln!(f, "Shannon-Fano Codes: {}", self.shannon_fano.table)?;
        writeln!(f, "Encoded Output: {}", self.shannon_fano.bits)?;
        writeln!(f)?;
        writeln!(f, "=== LZ77 Compression ===")?;
        write!(f, "Encoded Output: {}", tokens::render(&self.lz77))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_banana() {
        let analysis = analyze("banana", &AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis.bwt.last_column.iter().collect::<String>(), "annb$aa");
        assert_eq!(analysis.bwt_inverse, "banana");
        assert_eq!(analysis.rle, "a1n2b1$1a2");
        assert_eq!(analysis.huffman.decode().unwrap().iter().collect::<String>(), "banana");
        assert_eq!(analysis.shannon_fano.bits, "110100100");
        assert_eq!(lz77::lz77_decode(&analysis.lz77).unwrap(), "banana");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = "she sells sea shells by the sea shore";
        let parallel = analyze(input, &AnalyzeOptions::default()).unwrap();
        let sequential = analyze(
            input,
            &AnalyzeOptions {
                parallel: false,
                ..AnalyzeOptions::default()
            },
        )
        .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_analyze_rejects_empty() {
        assert_eq!(analyze("", &AnalyzeOptions::default()), Err(Error::EmptyInput));
    }

    #[test]
    fn test_analyze_sentinel_collision() {
        assert_eq!(
            analyze("10$", &AnalyzeOptions::default()),
            Err(Error::SentinelCollision { position: 2 })
        );
        let options = AnalyzeOptions {
            sentinel: '\0',
            ..AnalyzeOptions::default()
        };
        assert_eq!(analyze("10$", &options).unwrap().bwt_inverse, "10$");
    }

    #[test]
    fn test_analyze_rejects_zero_window() {
        let options = AnalyzeOptions {
            window_size: 0,
            ..AnalyzeOptions::default()
        };
        assert!(matches!(analyze("abc", &options), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_report_sections() {
        let report = analyze("abab", &AnalyzeOptions::default()).unwrap().to_string();
        for heading in ["(BWT)", "(RLE)", "Huffman Coding", "Shannon-Fano Coding", "LZ77"] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("Encoded Output: [(0, 0, 'a'), (0, 0, 'b'), (2, 2, '')]"));
    }

    #[test]
    fn test_decode_lz77_text() {
        assert_eq!(
            decode_lz77_text("[(0, 0, 'b'), (0, 0, 'a'), (0, 0, 'n'), (2, 3, '')]").unwrap(),
            "banana"
        );
        assert_eq!(decode_lz77_text("   "), Err(Error::EmptyInput));
        assert!(matches!(
            decode_lz77_text("[(0, 0, 'b'), (1, 1)]"),
            Err(Error::MalformedTokens { .. })
        ));
        assert!(matches!(
            decode_lz77_text("[(0, 0, 'b'), (5, 1, '')]"),
            Err(Error::BackReferenceOutOfRange { .. })
        ));
        assert!(matches!(
            decode_lz77_text("[(0, 0, 'a'), (1, 100000000, '')]"),
            Err(Error::OutputTooLarge { token: 1, .. })
        ));
    }

    #[test]
    fn test_bwt_rle_huffman_round_trip() {
        let output = bwt_rle_huffman("banana bandana", DEFAULT_SENTINEL).unwrap();
        assert_eq!(output.rle, rle::encode(&output.bwt));
        assert_eq!(output.decode().unwrap(), "banana bandana");
    }

    #[test]
    fn test_bwt_rle_huffman_digits_are_ambiguous() {
        let output = bwt_rle_huffman("a1", DEFAULT_SENTINEL).unwrap();
        assert!(output.decode().is_err());
    }
}
