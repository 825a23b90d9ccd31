//! KVP parsing: the per-line state machine and the parse driver.
//!
//! Each line is tokenized and fed through a small finite state machine
//! which yields at most one key/value contribution. The driver folds those
//! contributions into a [`KvpMap`], later lines overwriting earlier ones
//! per key, and aborts on the first malformed line.
//!
//! ## States
//!
//! `Start → HasKey → HasEq → HasVal → HasList`, with `Comment` and
//! `Failed` as absorbing terminals. All state is local to one line.
//!
//! ## Usage
//!
//! Most users should use the high-level functions re-exported at the crate
//! root:
//!
//! ```rust
//! use kvp_text::{from_str, Value};
//!
//! let map = from_str("foo\nthing = 124 # answer\n").unwrap();
//! assert_eq!(map.get("foo"), Some(&Value::Bool(true)));
//! assert_eq!(map.get("thing"), Some(&Value::Int(124)));
//! ```

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, trace};

use crate::encoding;
use crate::error::{Error, Result};
use crate::map::KvpMap;
use crate::token::{Token, Tokenizer};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Start,
    HasKey,
    HasEq,
    HasVal,
    HasList,
    Comment,
    Failed,
}

/// How the line's working value was produced; decides end-of-line handling.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ValueKind {
    Identifier,
    Scalar,
    List,
}

/// Maps a bare identifier value to its final form: `none`, `true` and
/// `false` (case-insensitive) become null and booleans, anything else
/// stays a string. Applied only to scalar identifiers, never to list
/// elements.
fn promote_identifier(text: String) -> Value {
    if text.eq_ignore_ascii_case("none") {
        Value::Null
    } else if text.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if text.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Str(text)
    }
}

fn push_list_element(value: &mut Option<Value>, element: Value) {
    if let Some(Value::List(items)) = value {
        items.push(element);
    }
}

/// Runs the FSM over one line, returning its contribution if any.
///
/// The token sequence is drained completely even after entering a terminal
/// state, so a trailing tokenizer error is always surfaced in preference
/// to a plain parse failure.
fn parse_line(content: &str, lineno: usize) -> Result<Option<(String, Value)>> {
    let mut key: Option<String> = None;
    let mut value: Option<Value> = None;
    let mut kind: Option<ValueKind> = None;
    let mut state = State::Start;

    for item in Tokenizer::new(content) {
        let token = item.map_err(|e| Error::lex(lineno, content, e))?;
        trace!(?state, ?token, "fsm step");
        state = match state {
            State::Start => match token {
                Token::Comment(_) | Token::TrailingBlanks => State::Comment,
                Token::Identifier(text) => {
                    key = Some(text);
                    State::HasKey
                }
                _ => State::Failed,
            },
            State::HasKey => match token {
                Token::EqualSign => State::HasEq,
                Token::Comment(_) | Token::TrailingBlanks => State::Comment,
                _ => State::Failed,
            },
            State::HasEq => match token {
                Token::Identifier(text) => {
                    value = Some(Value::Str(text));
                    kind = Some(ValueKind::Identifier);
                    State::HasVal
                }
                Token::Integer(v) => {
                    value = Some(Value::Int(v));
                    kind = Some(ValueKind::Scalar);
                    State::HasVal
                }
                Token::Float(v) => {
                    value = Some(Value::Float(v));
                    kind = Some(ValueKind::Scalar);
                    State::HasVal
                }
                Token::Str(s) => {
                    value = Some(Value::Str(s));
                    kind = Some(ValueKind::Scalar);
                    State::HasVal
                }
                _ => State::Failed,
            },
            State::HasVal => match token {
                Token::Separator(_) => {
                    // the scalar binding is replaced by a growing list
                    let first = value.take().map_or_else(Vec::new, |v| vec![v]);
                    value = Some(Value::List(first));
                    kind = Some(ValueKind::List);
                    State::HasList
                }
                Token::Comment(_) | Token::TrailingBlanks => State::Comment,
                _ => State::Failed,
            },
            State::HasList => match token {
                Token::Identifier(text) => {
                    push_list_element(&mut value, Value::Str(text));
                    State::HasList
                }
                Token::Integer(v) => {
                    push_list_element(&mut value, Value::Int(v));
                    State::HasList
                }
                Token::Float(v) => {
                    push_list_element(&mut value, Value::Float(v));
                    State::HasList
                }
                Token::Str(s) => {
                    push_list_element(&mut value, Value::Str(s));
                    State::HasList
                }
                Token::Separator(_) => State::HasList,
                Token::Comment(_) | Token::TrailingBlanks => State::Comment,
                Token::EqualSign => State::Failed,
            },
            State::Comment | State::Failed => state,
        };
    }

    if state == State::Failed {
        return Err(Error::parse(lineno, content));
    }
    let Some(key) = key else {
        return Ok(None);
    };
    let resolved = match (kind, value) {
        (Some(ValueKind::Identifier), Some(Value::Str(text))) => promote_identifier(text),
        (Some(_), Some(v)) => v,
        // an identifier alone is a boolean flag marked true
        _ => Value::Bool(true),
    };
    Ok(Some((key, resolved)))
}

/// Parses an already-split sequence of lines into a [`KvpMap`].
///
/// Later lines overwrite earlier ones for the same key. The first
/// malformed line aborts the call with an [`Error`] carrying its 1-based
/// line number and raw content; no partial result is returned.
///
/// # Examples
///
/// ```rust
/// use kvp_text::{from_lines, Value};
///
/// let map = from_lines(["a = 1", "a = 2"]).unwrap();
/// assert_eq!(map.get("a"), Some(&Value::Int(2)));
/// ```
///
/// # Errors
///
/// Returns an error for the first line that fails to lex or parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_lines<I, S>(lines: I) -> Result<KvpMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = KvpMap::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let mut content = line.as_ref();
        if let Some(stripped) = content.strip_suffix('\n') {
            content = stripped;
        }
        if let Some(stripped) = content.strip_suffix('\r') {
            content = stripped;
        }
        if let Some((key, value)) = parse_line(content, idx + 1)? {
            result.insert(key, value);
        }
    }
    Ok(result)
}

/// Parses a string of KVP text into a [`KvpMap`].
///
/// Line endings may be `\n`, `\r\n`, or bare `\r`.
///
/// # Examples
///
/// ```rust
/// use kvp_text::{from_str, Value};
///
/// let map = from_str("thing = 124\nsomebool = True\n").unwrap();
/// assert_eq!(map.get("thing"), Some(&Value::Int(124)));
/// assert_eq!(map.get("somebool"), Some(&Value::Bool(true)));
/// ```
///
/// # Errors
///
/// Returns an error for the first line that fails to lex or parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<KvpMap> {
    let normalized: Cow<'_, str> = if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    };
    from_lines(normalized.lines())
}

/// Parses KVP text from a reader.
///
/// The stream is read to the end and decoded with `encoding`, or UTF-8
/// when none is given (malformed sequences are replaced, not fatal).
/// Encoding detection is not attempted on readers; it applies to
/// [`from_file`] only.
///
/// # Errors
///
/// Returns an error if reading fails or any line fails to lex or parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R, encoding: Option<&'static Encoding>) -> Result<KvpMap>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let enc = encoding.unwrap_or(encoding_rs::UTF_8);
    let (text, _, _) = enc.decode(&bytes);
    from_str(&text)
}

/// Parses a KVP file into a [`KvpMap`].
///
/// The file's bytes are read once. When `encoding` is `None` the bytes are
/// run through confidence-scored charset detection; the guess is accepted
/// only at confidence ≥ 0.9, otherwise UTF-8 is used. A byte-order mark,
/// when present, takes precedence either way.
///
/// # Examples
///
/// ```rust,no_run
/// use kvp_text::from_file;
///
/// let map = from_file("settings.kvp", None).unwrap();
/// for (key, value) in map.iter() {
///     println!("{key} = {value}");
/// }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or any line fails to lex or
/// parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P>(path: P, encoding: Option<&'static Encoding>) -> Result<KvpMap>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "parsing kvp file");
    let bytes = fs::read(path)?;
    let enc = encoding::resolve_source_encoding(&bytes, encoding);
    let (text, used, _) = enc.decode(&bytes);
    trace!(encoding = used.name(), "decoded kvp file");
    from_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Option<(String, Value)> {
        parse_line(line, 1).unwrap()
    }

    #[test]
    fn test_comment_and_blank_lines_contribute_nothing() {
        assert_eq!(one("# This is a pure comment"), None);
        assert_eq!(one("    # so is this   "), None);
        assert_eq!(one(""), None);
        assert_eq!(one("   "), None);
    }

    #[test]
    fn test_bare_identifier_is_a_true_flag() {
        assert_eq!(one("foo"), Some(("foo".to_string(), Value::Bool(true))));
        assert_eq!(
            one("bar # my comment"),
            Some(("bar".to_string(), Value::Bool(true)))
        );
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(one("thing=124"), Some(("thing".to_string(), Value::Int(124))));
        assert_eq!(
            one("thing4 = \"foo\""),
            Some(("thing4".to_string(), Value::Str("foo".to_string())))
        );
        assert_eq!(
            one("thing5=-17.2"),
            Some(("thing5".to_string(), Value::Float(-17.2)))
        );
    }

    #[test]
    fn test_identifier_promotion_is_case_insensitive() {
        assert_eq!(one("somebool= True"), Some(("somebool".to_string(), Value::Bool(true))));
        assert_eq!(one("somebool= false"), Some(("somebool".to_string(), Value::Bool(false))));
        assert_eq!(one("something= None"), Some(("something".to_string(), Value::Null)));
        assert_eq!(
            one("other= word"),
            Some(("other".to_string(), Value::Str("word".to_string())))
        );
    }

    #[test]
    fn test_list_formation() {
        assert_eq!(
            one("lthing = 12,34;56:'foo' # a list"),
            Some((
                "lthing".to_string(),
                Value::List(vec![
                    Value::Int(12),
                    Value::Int(34),
                    Value::Int(56),
                    Value::Str("foo".to_string()),
                ])
            ))
        );
    }

    #[test]
    fn test_list_identifiers_are_not_promoted() {
        assert_eq!(
            one("l = 1,true,none"),
            Some((
                "l".to_string(),
                Value::List(vec![
                    Value::Int(1),
                    Value::Str("true".to_string()),
                    Value::Str("none".to_string()),
                ])
            ))
        );
    }

    #[test]
    fn test_consecutive_separators_are_consumed_silently() {
        assert_eq!(
            one("l = 1,,2"),
            Some((
                "l".to_string(),
                Value::List(vec![Value::Int(1), Value::Int(2)])
            ))
        );
    }

    #[test]
    fn test_comment_after_scalar_is_tolerated() {
        assert_eq!(
            one("thing=124 # the answer"),
            Some(("thing".to_string(), Value::Int(124)))
        );
    }

    #[test]
    fn test_separator_after_bare_identifier_fails() {
        assert_eq!(
            parse_line("someidentifier,", 1),
            Err(Error::parse(1, "someidentifier,"))
        );
    }

    #[test]
    fn test_leading_value_fails() {
        assert!(parse_line("= 5", 1).is_err());
        assert!(parse_line("124", 7).is_err());
    }

    #[test]
    fn test_second_equal_sign_fails() {
        assert!(parse_line("a = 1 = 2", 1).is_err());
    }

    #[test]
    fn test_lex_failure_wraps_line_context() {
        match parse_line("a = !oops", 3) {
            Err(Error::Lex { line, content, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "a = !oops");
            }
            other => panic!("expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let map = from_lines(["a = 1", "b = 2", "a = 3"]).unwrap();
        assert_eq!(map.get("a"), Some(&Value::Int(3)));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_error_carries_line_number() {
        let err = from_str("fine = 1\nbroken,\n").unwrap_err();
        assert_eq!(err, Error::parse(2, "broken,"));
    }

    #[test]
    fn test_universal_newlines() {
        let map = from_str("a = 1\r\nb = 2\rc = 3\n").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("c"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_from_reader_decodes_latin1() {
        let bytes: &[u8] = b"name = \"caf\xe9\"\n";
        let map = from_reader(bytes, Some(encoding_rs::WINDOWS_1252)).unwrap();
        assert_eq!(map.get("name"), Some(&Value::Str("café".to_string())));
    }
}
