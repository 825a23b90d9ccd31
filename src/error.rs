//! Error types for KVP parsing and writing.
//!
//! Two kinds of failure exist, matching the two layers of the reader:
//!
//! - [`TokenizeError`]: a single line's text could not be turned into
//!   tokens. Always scoped to one line and carries byte positions within
//!   that line, never line numbers.
//! - [`Error`]: the crate-level error. The parse driver wraps every
//!   [`TokenizeError`] with the 1-based line number and the raw line
//!   content before it reaches the caller, and reports lines whose state
//!   machine ends in the failed state the same way.
//!
//! There is no recovery: the first malformed line aborts the whole parse
//! call. The writer has no format-specific failures of its own; only I/O
//! errors can surface from it.
//!
//! ## Examples
//!
//! ```rust
//! use kvp_text::{from_str, Error};
//!
//! let result = from_str("= 5");
//! match result {
//!     Err(Error::Parse { line, content }) => {
//!         assert_eq!(line, 1);
//!         assert_eq!(content, "= 5");
//!     }
//!     other => panic!("expected a parse error, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// A failure to tokenize one line of KVP text.
///
/// Raised when the token grammar cannot fully consume a line, or when a
/// numeric literal matches the grammar but does not convert to a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenizeError {
    /// The scan stopped before the end of the line: the text from `pos`
    /// onward matched no token alternative.
    #[error("tokenizer stopped at byte {pos} of {len} in <{text}>")]
    UnmatchedInput {
        pos: usize,
        len: usize,
        text: String,
    },

    /// A numeric literal matched the grammar but failed conversion,
    /// e.g. `.` alone, an exponent with no digits, or an integer that
    /// overflows i64.
    #[error("invalid numeric literal <{literal}> at byte {pos}")]
    InvalidNumber { literal: String, pos: usize },
}

/// Represents all possible errors returned by the parse and write calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A line failed to tokenize; wraps the tokenizer failure with line context
    #[error("failed to lex line {line} <{content}>: {source}")]
    Lex {
        line: usize,
        content: String,
        source: TokenizeError,
    },

    /// A line tokenized but its state machine ended in the failed state
    #[error("failed to parse line {line} <{content}>")]
    Parse { line: usize, content: String },
}

impl Error {
    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Wraps a [`TokenizeError`] with the line number and raw content of
    /// the offending line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvp_text::{Error, TokenizeError};
    ///
    /// let inner = TokenizeError::UnmatchedInput {
    ///     pos: 4,
    ///     len: 8,
    ///     text: "a = !?!?".to_string(),
    /// };
    /// let err = Error::lex(3, "a = !?!?", inner);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn lex(line: usize, content: &str, source: TokenizeError) -> Self {
        Error::Lex {
            line,
            content: content.to_string(),
            source,
        }
    }

    /// Creates a parse error identifying the offending line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvp_text::Error;
    ///
    /// let err = Error::parse(2, "someidentifier,");
    /// assert!(err.to_string().contains("<someidentifier,>"));
    /// ```
    pub fn parse(line: usize, content: &str) -> Self {
        Error::Parse {
            line,
            content: content.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
