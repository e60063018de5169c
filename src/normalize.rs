//! Text normalization, the first pass of chunking.
//!
//! ```text
//! "Title\r\n\r\n\r\n\r\nBody  \t text\r"
//!         ↓ line endings: CRLF, CR -> LF
//! "Title\n\n\n\nBody  \t text\n"
//!         ↓ horizontal whitespace runs -> one space
//! "Title\n\n\n\nBody text\n"
//!         ↓ 3+ newlines -> 2
//! "Title\n\nBody text\n"
//!         ↓ trim
//! "Title\n\nBody text"
//! ```
//!
//! Blank lines are significant downstream (they separate paragraphs), so
//! they are capped at one rather than removed.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Normalize text for chunking.
///
/// ```rust
/// use shingle::normalize;
///
/// assert_eq!(normalize("  a\r\n\r\n\r\nb \t c  "), "a\n\nb c");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Decode bytes as UTF-8, replacing malformed sequences with U+FFFD.
///
/// Borrowed when the input is already valid.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
