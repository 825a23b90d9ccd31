//! # kvp_text
//!
//! A parser and writer for the KVP (key-value-pair) text format: a small
//! human-writable format used for lightweight configuration and data
//! records.
//!
//! ## What is KVP?
//!
//! One record per line, `identifier = value`, where a value is an integer,
//! a float, a quoted string, the literals `true`/`false`/`none`
//! (case-insensitive), or a `,`/`;`/`:`-separated list of those. A bare
//! identifier is a boolean flag set to `true`, and `#` starts a comment:
//!
//! ```text
//! # deployment record
//! region = "eu-west-1"
//! replicas = 3
//! thresholds = 0.5,0.9,0.99
//! verbose
//! ```
//!
//! ## Key Features
//!
//! - **Ordered mappings**: parsing produces a [`KvpMap`] that keeps keys
//!   in first-seen order; re-parsing written output preserves layout
//! - **Last write wins**: a key repeated on a later line overwrites the
//!   earlier value, in place
//! - **Encoding aware**: explicit encodings everywhere, confidence-scored
//!   charset sniffing for files, locale-derived default output encoding
//! - **Precise errors**: the first malformed line aborts the parse with
//!   its line number and raw content; nothing is skipped silently
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use kvp_text::{from_str, to_string, Value};
//!
//! let map = from_str("thing = 124\nlthing = 12,34;56:'foo' # a list\n").unwrap();
//!
//! assert_eq!(map.get("thing"), Some(&Value::Int(124)));
//! assert_eq!(
//!     map.get("lthing"),
//!     Some(&Value::List(vec![
//!         Value::Int(12),
//!         Value::Int(34),
//!         Value::Int(56),
//!         Value::Str("foo".to_string()),
//!     ]))
//! );
//!
//! // write it back out
//! let text = to_string(&map);
//! assert_eq!(from_str(&text).unwrap(), map);
//! ```
//!
//! ## Files and Encodings
//!
//! ```rust,no_run
//! use kvp_text::{from_file, to_file};
//!
//! // sniff the encoding, falling back to UTF-8 below 0.9 confidence
//! let map = from_file("settings.kvp", None).unwrap();
//!
//! // write with an explicitly fixed encoding
//! to_file("settings.out.kvp", &map, Some(encoding_rs::WINDOWS_1252)).unwrap();
//! ```
//!
//! ## Concurrency
//!
//! Parsing and writing are plain synchronous functions with no shared
//! state; independent calls from multiple threads need no synchronization.
//! Serializing concurrent writes to a single destination is the caller's
//! responsibility.

pub mod encoding;
pub mod error;
pub mod map;
pub mod parse;
pub mod token;
pub mod value;
pub mod write;

pub use error::{Error, Result, TokenizeError};
pub use map::KvpMap;
pub use parse::{from_file, from_lines, from_reader, from_str};
pub use token::{Token, Tokenizer};
pub use value::Value;
pub use write::{to_file, to_string, to_writer};
