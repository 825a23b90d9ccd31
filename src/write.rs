//! KVP writing.
//!
//! The writer formats a [`KvpMap`] back to KVP text, one `key = value`
//! line per entry, in map order. Value syntax is chosen per runtime type:
//!
//! - strings are double-quoted, or single-quoted when they contain a
//!   double quote (best effort; a string holding both quote characters is
//!   not disambiguated further)
//! - an empty list leaves nothing after the `=`
//! - a non-empty list is comma-joined with string elements quoted as above
//! - numbers, booleans and null use their default text forms (`none` for
//!   null; floats always keep a mantissa dot so they read back as floats)
//!
//! No reordering or deduplication happens; the map's own key uniqueness
//! guarantees none is needed. The writer has no format-specific failure
//! modes, so only I/O errors can surface.
//!
//! ## Usage
//!
//! ```rust
//! use kvp_text::{from_str, to_string};
//!
//! let map = from_str("foo\nthing = 124\n").unwrap();
//! assert_eq!(to_string(&map), "foo = true\nthing = 124\n");
//! ```

use std::fs;
use std::io;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::encoding;
use crate::error::Result;
use crate::map::KvpMap;

/// Formats a mapping as KVP text.
///
/// # Examples
///
/// ```rust
/// use kvp_text::{to_string, KvpMap, Value};
///
/// let mut map = KvpMap::new();
/// map.insert("name".to_string(), Value::from("Alice"));
/// map.insert("tags".to_string(), Value::List(vec![Value::from(1), Value::from(2)]));
///
/// assert_eq!(to_string(&map), "name = \"Alice\"\ntags = 1,2\n");
/// ```
#[must_use]
pub fn to_string(map: &KvpMap) -> String {
    let mut output = String::with_capacity(map.len() * 16);
    for (key, value) in map.iter() {
        output.push_str(key);
        output.push_str(" = ");
        output.push_str(&value.to_string());
        output.push('\n');
    }
    output
}

/// Writes a mapping as KVP text to a writer.
///
/// The text is encoded with `encoding`, or the platform's preferred
/// encoding ([`encoding::preferred_encoding`]) when none is given.
/// Characters the encoding cannot represent are replaced by the encoder.
///
/// # Examples
///
/// ```rust
/// use kvp_text::{to_writer, KvpMap, Value};
///
/// let mut map = KvpMap::new();
/// map.insert("thing".to_string(), Value::from(124));
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &map, Some(encoding_rs::UTF_8)).unwrap();
/// assert_eq!(buffer, b"thing = 124\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, map: &KvpMap, encoding: Option<&'static Encoding>) -> Result<()>
where
    W: io::Write,
{
    let enc = encoding.unwrap_or_else(encoding::preferred_encoding);
    let text = to_string(map);
    let (bytes, _, _) = enc.encode(&text);
    writer.write_all(&bytes)?;
    Ok(())
}

/// Writes a mapping as KVP text to a file, creating or truncating it.
///
/// Encoding selection is as for [`to_writer`]. The file is closed on every
/// exit path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_file<P>(path: P, map: &KvpMap, encoding: Option<&'static Encoding>) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "writing kvp file");
    let enc = encoding.unwrap_or_else(encoding::preferred_encoding);
    let text = to_string(map);
    let (bytes, _, _) = enc.encode(&text);
    fs::write(path, bytes)?;
    Ok(())
}
