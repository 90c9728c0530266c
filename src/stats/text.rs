//! Per-message text features: media markers, links, emojis and words.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid link regex"));

// Each codepoint in these blocks counts as one emoji; sequences are not grouped.
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA70}-\x{1FAFF}",
        r"\x{FE00}-\x{FE0F}",
        "]",
    ))
    .expect("Invalid emoji regex")
});

// Letters, digits and underscore. Combining marks and variation selectors
// split words instead of extending them.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("Invalid word regex"));

/// Splits text into word tokens. Case is preserved.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

/// Removes every media marker from `body`.
///
/// Returns the remaining text and whether any marker was present.
pub fn strip_media<'a, S: AsRef<str>>(body: &'a str, markers: &[S]) -> (Cow<'a, str>, bool) {
    let mut text = Cow::Borrowed(body);
    let mut found = false;

    for marker in markers {
        let marker = marker.as_ref();
        if !marker.is_empty() && text.contains(marker) {
            found = true;
            text = Cow::Owned(text.replace(marker, ""));
        }
    }

    (text, found)
}

/// Number of `http://` or `https://` links.
pub fn count_links(text: &str) -> usize {
    LINK_RE.find_iter(text).count()
}

/// Removes links and surrounding whitespace.
pub fn strip_links(text: &str) -> Cow<'_, str> {
    match LINK_RE.replace_all(text, "") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Emoji codepoints in order of appearance.
pub fn emojis(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str())
}

/// Returns `true` if a token consists only of numeric characters.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}
