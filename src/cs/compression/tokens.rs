//! Text form of LZ77 token lists.
//!
//! The format is a bracketed list of 3-tuples, each holding the back-offset,
//! the match length and a quoted literal of at most one character:
//!
//! ```text
//! [(0, 0, 'b'), (0, 0, 'a'), (0, 0, 'n'), (2, 3, '')]
//! ```
//!
//! Literals may use single or double quotes and the escapes `\\`, `\'`,
//! `\"`, `\n`, `\t` and `\r`. Parsing checks structure only; whether the
//! offsets are valid is decided when the tokens are replayed.

use std::fmt;

use super::lz77::Token;
use super::Result;
use crate::cs::error::Error;

/// Parse a token list, rejecting anything that is not a list of well-formed
/// 3-tuples.
///
/// ```
/// use textcodec::compression::{lz77_decode, tokens};
///
/// let parsed = tokens::parse("[(0, 0, 'b'), (0, 0, 'a'), (0, 0, 'n'), (2, 3, '')]").unwrap();
/// assert_eq!(lz77_decode(&parsed).unwrap(), "banana");
/// assert!(tokens::parse("[(0, 0)]").is_err());
/// ```
pub fn parse(text: &str) -> Result<Vec<Token<char>>> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let tokens = parser.list()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(parser.error("unexpected text after the closing ']'"));
    }
    Ok(tokens)
}

/// Render tokens in the syntax accepted by [`parse`].
pub fn render(tokens: &[Token<char>]) -> String {
    let items: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for Token<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, '", self.offset, self.length)?;
        if let Some(c) = self.next {
            match c {
                '\'' => write!(f, "\\'")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\t' => write!(f, "\\t")?,
                '\r' => write!(f, "\\r")?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "')")
    }
}

/// One element of a tuple before its position in the token is checked.
enum Element {
    Int(usize),
    Literal(String),
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::MalformedTokens {
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, wanted: char) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.error(format!("expected '{wanted}', found end of input"))),
        }
    }

    /// Consume `c` if it is the next non-blank character.
    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn list(&mut self) -> Result<Vec<Token<char>>> {
        self.expect('[')?;
        let mut tokens = Vec::new();
        if self.eat(']') {
            return Ok(tokens);
        }
        loop {
            tokens.push(self.token()?);
            if self.eat(']') {
                return Ok(tokens);
            }
            self.expect(',')?;
            // Trailing comma before the closing bracket.
            if self.eat(']') {
                return Ok(tokens);
            }
        }
    }

    fn token(&mut self) -> Result<Token<char>> {
        self.expect('(')?;
        let start = self.pos;
        let mut elements = Vec::new();
        if !self.eat(')') {
            loop {
                elements.push(self.element()?);
                if self.eat(')') {
                    break;
                }
                self.expect(',')?;
                if self.eat(')') {
                    break;
                }
            }
        }

        let arity_error = |found: usize| Error::MalformedTokens {
            position: start,
            reason: format!("token must have 3 elements, found {found}"),
        };
        let [offset, length, next]: [Element; 3] =
            elements.try_into().map_err(|rest: Vec<Element>| arity_error(rest.len()))?;

        let (Element::Int(offset), Element::Int(length)) = (offset, length) else {
            return Err(Error::MalformedTokens {
                position: start,
                reason: "offset and length must be non-negative integers".to_string(),
            });
        };
        let Element::Literal(literal) = next else {
            return Err(Error::MalformedTokens {
                position: start,
                reason: "third element must be a quoted literal".to_string(),
            });
        };
        let mut literal_chars = literal.chars();
        let next = match (literal_chars.next(), literal_chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(c),
            (Some(_), Some(_)) => {
                return Err(Error::MalformedTokens {
                    position: start,
                    reason: format!("literal {literal:?} has more than one character"),
                })
            }
        };
        Ok(Token {
            offset,
            length,
            next,
        })
    }

    fn element(&mut self) -> Result<Element> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.integer().map(Element::Int),
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                self.literal(quote).map(Element::Literal)
            }
            Some('-') => Err(self.error("negative numbers are not allowed")),
            Some(c) => Err(self.error(format!("unexpected '{c}' in token"))),
            None => Err(self.error("unexpected end of input in token")),
        }
    }

    fn integer(&mut self) -> Result<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits.parse().map_err(|_| Error::MalformedTokens {
            position: start,
            reason: format!("integer {digits} is out of range"),
        })
    }

    fn literal(&mut self, quote: char) -> Result<String> {
        let mut value = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error("unterminated literal"));
            };
            self.pos += 1;
            match c {
                c if c == quote => return Ok(value),
                '\\' => {
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c @ ('\\' | '\'' | '"')) => c,
                        Some(c) => return Err(self.error(format!("unknown escape '\\{c}'"))),
                        None => return Err(self.error("unterminated literal")),
                    };
                    self.pos += 1;
                    value.push(escaped);
                }
                c => value.push(c),
            }
        }
    }
}
