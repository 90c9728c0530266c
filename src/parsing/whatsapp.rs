//! Line-level WhatsApp export parsing utilities.
//!
//! The transcript parser is built from three independent pieces:
//! - [`match_header`] recognizes `<date>[,] <time> - <rest>` header lines
//! - [`parse_header_timestamp`] tries the candidate date formats in priority order
//! - [`SystemMessageFilter`] drops protocol/administrative notices

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// `D/D/YY, H:MM - rest` with optional comma and 2-4 digit year.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d{2,4}),?\s+(\d{1,2}:\d{2}) - (.*)$")
        .expect("header regex is valid")
});

/// A chrono format paired with the year width it accepts.
#[derive(Debug, Clone, Copy)]
struct DateCandidate {
    pattern: &'static str,
    year_digits: usize,
}

/// Candidate formats in priority order: month-first wins whenever it parses.
const DATE_CANDIDATES: [DateCandidate; 4] = [
    DateCandidate {
        pattern: "%m/%d/%y %H:%M",
        year_digits: 2,
    },
    DateCandidate {
        pattern: "%m/%d/%Y %H:%M",
        year_digits: 4,
    },
    DateCandidate {
        pattern: "%d/%m/%y %H:%M",
        year_digits: 2,
    },
    DateCandidate {
        pattern: "%d/%m/%Y %H:%M",
        year_digits: 4,
    },
];

/// English notice fragments (matched against the lowercased, trimmed body).
const SYSTEM_PATTERNS_EN: &[&str] = &[
    "end-to-end encrypted",
    "only people in this chat can read",
    "created group",
    "you were added",
    "joined using this group's invite link",
    "changed the subject from",
    "changed this group's icon",
    "changed the group description",
    "this message was deleted",
    "you deleted this message",
    "missed voice call",
    "missed video call",
    "live location shared",
    "location: https://maps.google.com",
    ".vcf (file attached)",
    "contact card omitted",
];

/// Spanish notice fragments.
const SYSTEM_PATTERNS_ES: &[&str] = &[
    "cifrados de extremo a extremo",
    "solo las personas en este chat pueden",
    "creó el grupo",
    "se unió usando el enlace de invitación",
    "cambió el asunto",
    "cambió el ícono del grupo",
    "se eliminó este mensaje",
    "eliminaste este mensaje",
    "llamada perdida",
    "videollamada perdida",
    "ubicación en tiempo real compartida",
    "ubicación: https://maps.google.com",
    ".vcf (archivo adjunto)",
    "tarjeta de contacto omitida",
];

/// Membership changes, checked only on bodies without a sender.
///
/// `"Alice added Bob"` is a notice, `"Bob: I added sugar"` is not.
const MEMBERSHIP_PATTERNS: &[&str] = &[
    " added ",
    " removed ",
    " left",
    " joined",
    " añadió a ",
    " eliminó a ",
    " salió",
    " se unió",
];

/// Bodies that are notices only when they match exactly.
const SYSTEM_BODIES_EXACT: &[&str] = &["null"];

/// The pieces of a recognized header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Raw date text, e.g. `12/01/23`
    pub date: &'a str,
    /// Raw time text, e.g. `10:00`
    pub time: &'a str,
    /// Everything after `" - "`
    pub rest: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// Splits `rest` once on the first `": "` into sender and text.
    ///
    /// Without a delimiter the whole remainder is the body of a sender-less notice.
    pub fn split_sender(&self) -> (Option<&'a str>, &'a str) {
        match self.rest.split_once(": ") {
            Some((sender, text)) => (Some(sender), text),
            None => (None, self.rest),
        }
    }
}

/// Matches a full line against the header pattern.
///
/// # Example
///
/// ```
/// use chatstats::parsing::whatsapp::match_header;
///
/// let header = match_header("12/01/23, 10:00 - Alice: hi").unwrap();
/// assert_eq!(header.date, "12/01/23");
/// assert_eq!(header.split_sender(), (Some("Alice"), "hi"));
///
/// assert!(match_header("just some text").is_none());
/// ```
pub fn match_header(line: &str) -> Option<HeaderLine<'_>> {
    let caps = HEADER_RE.captures(line)?;
    Some(HeaderLine {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        rest: caps.get(3)?.as_str(),
    })
}

/// Parses header date and time by trying each candidate format in order.
///
/// Month-first readings are preferred; day-first is used only when the
/// month-first reading is impossible (e.g. a first component above 12).
/// Returns `None` when no candidate parses.
///
/// # Example
///
/// ```
/// use chatstats::parsing::whatsapp::parse_header_timestamp;
/// use chrono::Datelike;
///
/// let us = parse_header_timestamp("12/01/23", "10:00").unwrap();
/// assert_eq!((us.month(), us.day()), (12, 1));
///
/// let eu = parse_header_timestamp("13/01/2023", "10:00").unwrap();
/// assert_eq!((eu.month(), eu.day()), (1, 13));
/// ```
pub fn parse_header_timestamp(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let year_digits = date_str.rsplit('/').next().map_or(0, str::len);
    let datetime_str = format!("{date_str} {time_str}");

    DATE_CANDIDATES
        .iter()
        .filter(|candidate| candidate.year_digits == year_digits)
        .find_map(|candidate| NaiveDateTime::parse_from_str(&datetime_str, candidate.pattern).ok())
}

/// Recognizes protocol and administrative notices in English and Spanish.
///
/// Encryption banners, membership changes, deleted-message placeholders,
/// missed calls, shared locations, contact cards and literal `null` bodies
/// are all treated as notices.
#[derive(Debug, Clone)]
pub struct SystemMessageFilter {
    patterns: Vec<String>,
}

impl Default for SystemMessageFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMessageFilter {
    /// Creates a filter with the built-in bilingual pattern set.
    pub fn new() -> Self {
        Self {
            patterns: SYSTEM_PATTERNS_EN
                .iter()
                .chain(SYSTEM_PATTERNS_ES)
                .map(|p| (*p).to_string())
                .collect(),
        }
    }

    /// Adds lowercase substrings on top of the built-in set.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(
            extra
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty()),
        );
        self
    }

    /// Returns `true` if the body is a system notice.
    pub fn is_system_message(&self, body: &str) -> bool {
        let text = body.trim().to_lowercase();

        SYSTEM_BODIES_EXACT.contains(&text.as_str())
            || self.patterns.iter().any(|p| text.contains(p.as_str()))
    }

    /// Like [`is_system_message`](Self::is_system_message), also treating
    /// sender-less membership changes as notices.
    pub fn is_notice(&self, sender: Option<&str>, body: &str) -> bool {
        if self.is_system_message(body) {
            return true;
        }
        if sender.is_some() {
            return false;
        }
        let text = body.trim().to_lowercase();
        MEMBERSHIP_PATTERNS.iter().any(|p| text.contains(p))
    }
}
