//! Line tokenizer for the KVP format.
//!
//! [`Tokenizer`] turns one line of text into a finite sequence of
//! [`Token`]s. A fresh tokenizer is created per line; it is lazy (tokens
//! are produced on demand) and not rewindable. Matching repeatedly tries a
//! fixed set of alternatives at the current byte offset, in priority order,
//! and advances by the consumed length. If nothing matches before the end
//! of the line, the iterator yields a single
//! [`TokenizeError::UnmatchedInput`] describing the leftover text, then
//! fuses.
//!
//! The alternatives, highest priority first:
//!
//! 1. optional whitespace then `#` to end of line (comment)
//! 2. `[A-Za-z_][A-Za-z0-9_]*` (identifier)
//! 3. `,` `;` `:` (separator)
//! 4. `=` with optional surrounding whitespace, one token
//! 5. single- or double-quoted string, no escape processing
//! 6. signed integer, not followed by a digit, `.`, `e`, or `E`
//! 7. float without exponent, not followed by `e`/`E`
//! 8. float with exponent
//! 9. whitespace reaching end of line (trailing blanks)
//!
//! ## Examples
//!
//! ```rust
//! use kvp_text::{Token, Tokenizer};
//!
//! let tokens: Vec<Token> = Tokenizer::new("thing = 12,'foo'")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Identifier("thing".to_string()),
//!         Token::EqualSign,
//!         Token::Integer(12),
//!         Token::Separator(','),
//!         Token::Str("foo".to_string()),
//!     ]
//! );
//! ```

use crate::error::TokenizeError;

/// One lexical element of a KVP line.
///
/// Numeric tokens carry the converted value; textual tokens carry the
/// decoded text. A comment's text includes the leading `#`, a quoted
/// string's text excludes the quotes.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Comment(String),
    Identifier(String),
    Separator(char),
    EqualSign,
    Str(String),
    Integer(i64),
    Float(f64),
    TrailingBlanks,
}

/// A lazy tokenizer over one line of text.
///
/// Implements `Iterator<Item = Result<Token, TokenizeError>>`. An error
/// item is always the last item produced.
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            text,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            self.done = true;
            return None;
        }
        let matched = match_comment(rest)
            .or_else(|| match_identifier(rest))
            .or_else(|| match_separator(rest))
            .or_else(|| match_equal_sign(rest))
            .or_else(|| match_string(rest))
            .map(Ok)
            .or_else(|| match_number(rest, self.pos));
        match matched {
            Some(Ok((token, used))) => {
                self.pos += used;
                Some(Ok(token))
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            None => match match_trailing_blanks(rest) {
                Some((token, used)) => {
                    self.pos += used;
                    Some(Ok(token))
                }
                None => {
                    self.done = true;
                    Some(Err(TokenizeError::UnmatchedInput {
                        pos: self.pos,
                        len: self.text.len(),
                        text: self.text.to_string(),
                    }))
                }
            },
        }
    }
}

/// Optional whitespace then `#` through end of line. The token text starts
/// at the `#`; the consumed length covers the whole remainder.
fn match_comment(rest: &str) -> Option<(Token, usize)> {
    for (i, ch) in rest.char_indices() {
        if ch == '#' {
            return Some((Token::Comment(rest[i..].to_string()), rest.len()));
        }
        if !ch.is_whitespace() {
            return None;
        }
    }
    None
}

fn match_identifier(rest: &str) -> Option<(Token, usize)> {
    let bytes = rest.as_bytes();
    let first = *bytes.first()?;
    if !first.is_ascii_alphabetic() && first != b'_' {
        return None;
    }
    let mut end = 1;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    Some((Token::Identifier(rest[..end].to_string()), end))
}

fn match_separator(rest: &str) -> Option<(Token, usize)> {
    let ch = rest.chars().next()?;
    if ch == ',' || ch == ';' || ch == ':' {
        Some((Token::Separator(ch), ch.len_utf8()))
    } else {
        None
    }
}

/// `=` with optional surrounding whitespace, consumed as one token.
fn match_equal_sign(rest: &str) -> Option<(Token, usize)> {
    for (i, ch) in rest.char_indices() {
        if ch == '=' {
            let mut end = i + 1;
            for (j, trailing) in rest[end..].char_indices() {
                if !trailing.is_whitespace() {
                    end += j;
                    return Some((Token::EqualSign, end));
                }
            }
            return Some((Token::EqualSign, rest.len()));
        }
        if !ch.is_whitespace() {
            return None;
        }
    }
    None
}

/// Raw text between matching quote characters; no escape interpretation.
/// Fails (so the line fails to lex) when the closing quote is missing.
fn match_string(rest: &str) -> Option<(Token, usize)> {
    let quote = rest.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let body = &rest[1..];
    let close = body.find(quote)?;
    Some((Token::Str(body[..close].to_string()), close + 2))
}

/// Integer and both float shapes, sharing the sign/digit prefix. The
/// integer alternative is rejected when the next character would extend it
/// into a float; the no-exponent float is extended into the exponent form
/// when an `e`/`E` follows its digits.
fn match_number(rest: &str, abs_pos: usize) -> Option<Result<(Token, usize), TokenizeError>> {
    let bytes = rest.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));

    let mut int_end = sign;
    while int_end < bytes.len() && bytes[int_end].is_ascii_digit() {
        int_end += 1;
    }

    if int_end > sign && !matches!(bytes.get(int_end), Some(b'0'..=b'9' | b'.' | b'e' | b'E')) {
        let literal = &rest[..int_end];
        return Some(match literal.parse::<i64>() {
            Ok(v) => Ok((Token::Integer(v), int_end)),
            Err(_) => Err(TokenizeError::InvalidNumber {
                literal: literal.to_string(),
                pos: abs_pos,
            }),
        });
    }

    if bytes.get(int_end) != Some(&b'.') {
        return None;
    }
    let mut end = int_end + 1;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        end += 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    let literal = &rest[..end];
    Some(match literal.parse::<f64>() {
        Ok(v) => Ok((Token::Float(v), end)),
        Err(_) => Err(TokenizeError::InvalidNumber {
            literal: literal.to_string(),
            pos: abs_pos,
        }),
    })
}

/// Pure whitespace through end of line.
fn match_trailing_blanks(rest: &str) -> Option<(Token, usize)> {
    if !rest.is_empty() && rest.chars().all(char::is_whitespace) {
        Some((Token::TrailingBlanks, rest.len()))
    } else {
        None
    }
}
