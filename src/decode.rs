//! Byte-to-text decoding for uploaded transcripts.
//!
//! Exports are usually UTF-8, but older Android builds write Latin-1.
//! Decoding tries UTF-8 first and falls back to Latin-1, which maps every
//! byte to the code point of the same value and therefore never fails.

use std::borrow::Cow;

/// Which decoding succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Valid UTF-8 (a leading BOM is stripped)
    Utf8,
    /// Fallback: every byte read as U+0000..U+00FF
    Latin1,
}

/// Decodes transcript bytes, preferring UTF-8.
///
/// # Example
///
/// ```
/// use chatstats::decode::{decode_transcript, Encoding};
///
/// let (text, enc) = decode_transcript("señal".as_bytes());
/// assert_eq!(text, "señal");
/// assert_eq!(enc, Encoding::Utf8);
///
/// let (text, enc) = decode_transcript(&[b'a', 0xF1, b'o']);
/// assert_eq!(text, "año");
/// assert_eq!(enc, Encoding::Latin1);
/// ```
pub fn decode_transcript(bytes: &[u8]) -> (Cow<'_, str>, Encoding) {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), Encoding::Utf8),
        Err(_) => (
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Latin1,
        ),
    }
}
