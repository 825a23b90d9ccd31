//! Character encoding resolution for KVP I/O.
//!
//! Reading a named file without an explicit encoding runs confidence-scored
//! charset detection over the raw bytes and only trusts the guess above a
//! fixed confidence threshold. Writing without an explicit encoding uses a
//! normalized "preferred" encoding derived from the platform locale, with
//! known problematic codeset names remapped and an unconditional fallback
//! to UTF-8 when the resolved name is not recognized.
//!
//! All encodings are [`encoding_rs`] statics, so callers pass
//! `Some(encoding_rs::WINDOWS_1252)` and the like.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// A detection result below this confidence is ignored and the default
/// encoding is used instead.
pub const MIN_DETECT_CONFIDENCE: f32 = 0.9;

/// Codeset names locales are known to report that the WHATWG label
/// registry does not accept, folded to compatible labels.
const CODESET_ALIASES: &[(&str, &str)] = &[
    ("ansi_x3.4-1968", "windows-1252"),
    ("646", "windows-1252"),
    ("cp65001", "utf-8"),
    ("c", "utf-8"),
    ("posix", "utf-8"),
];

/// Heuristically detects the character encoding of a byte stream.
///
/// Returns the best-guess encoding and the detector's confidence in it,
/// or `None` when the guessed charset has no corresponding encoding.
///
/// # Examples
///
/// ```rust
/// let (encoding, confidence) = kvp_text::encoding::detect("héllo wörld, ça va?".as_bytes()).unwrap();
/// assert_eq!(encoding, encoding_rs::UTF_8);
/// assert!(confidence > 0.5);
/// ```
#[must_use]
pub fn detect(bytes: &[u8]) -> Option<(&'static Encoding, f32)> {
    let (charset, confidence, _language) = chardet::detect(bytes);
    let label = chardet::charset2encoding(&charset);
    Encoding::for_label(label.as_bytes()).map(|encoding| (encoding, confidence))
}

/// Picks the encoding for a byte source: the explicit one when given,
/// otherwise a detection result at confidence ≥ [`MIN_DETECT_CONFIDENCE`],
/// otherwise UTF-8.
#[must_use]
pub fn resolve_source_encoding(
    bytes: &[u8],
    explicit: Option<&'static Encoding>,
) -> &'static Encoding {
    if let Some(encoding) = explicit {
        return encoding;
    }
    match detect(bytes) {
        Some((encoding, confidence)) if confidence >= MIN_DETECT_CONFIDENCE => {
            debug!(encoding = encoding.name(), confidence, "sniffed source encoding");
            encoding
        }
        _ => UTF_8,
    }
}

/// The normalized preferred output encoding for this platform.
///
/// Derived from the locale environment (`LC_ALL`, `LC_CTYPE`, `LANG`, in
/// that order): the codeset suffix of e.g. `en_US.UTF-8`, or the bare
/// locale name for codeset-less values like `C`. Known problematic names
/// are remapped first; anything unrecognized falls back to UTF-8.
#[must_use]
pub fn preferred_encoding() -> &'static Encoding {
    locale_codeset()
        .and_then(|codeset| {
            let lowered = codeset.to_ascii_lowercase();
            let label = CODESET_ALIASES
                .iter()
                .find(|(alias, _)| *alias == lowered)
                .map(|(_, label)| *label)
                .unwrap_or(lowered.as_str());
            Encoding::for_label(label.as_bytes())
        })
        .unwrap_or(UTF_8)
}

/// The codeset portion of the first non-empty locale variable, e.g.
/// `UTF-8` out of `en_US.UTF-8@euro`.
fn locale_codeset() -> Option<String> {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        let Ok(raw) = std::env::var(var) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let base = raw.split('@').next().unwrap_or(raw.as_str());
        return Some(match base.split_once('.') {
            Some((_, codeset)) => codeset.to_string(),
            None => base.to_string(),
        });
    }
    None
}
