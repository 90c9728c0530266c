//! Message record produced by the transcript parser.
//!
//! This module provides [`Message`], one reconstructed entry of an exported
//! chat transcript. The parser emits messages in file order; the statistics
//! aggregator re-sorts them by timestamp before doing anything order-sensitive.
//!
//! # Overview
//!
//! A message consists of:
//! - **Required**: `timestamp` (minute precision) and `body`
//! - **Optional**: `sender` (absent for notices without a `"Name: "` prefix)
//!
//! # Examples
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 12, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "hello").with_sender("Alice");
//!
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.body(), "hello");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let msg = Message::new(ts, "hi");
//! let json = serde_json::to_string(&msg)?;
//!
//! // sender is omitted when absent
//! assert!(!json.contains("sender"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single reconstructed chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time of the header line |
/// | `sender` | `Option<String>` | Text before the first `": "`, if any |
/// | `body` | `String` | Message text, continuation lines joined with `\n` |
///
/// The body never contains a line that itself matches the header pattern,
/// since such lines always start a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent (exports carry no timezone).
    pub timestamp: NaiveDateTime,

    /// Display name of the author.
    ///
    /// `None` for lines with no `"Name: "` prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Full message text including continuation lines.
    pub body: String,
}

impl Message {
    /// Creates a message without a sender.
    pub fn new(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: None,
            body: body.into(),
        }
    }

    /// Creates a message with all fields specified.
    pub fn with_metadata(
        timestamp: NaiveDateTime,
        sender: Option<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender,
            body: body.into(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name, if known.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the calendar date the message was sent on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Appends a continuation line to the body.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(ts(12, 0), "Hello");
        assert_eq!(msg.body(), "Hello");
        assert!(msg.sender().is_none());
        assert_eq!(msg.timestamp(), ts(12, 0));
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::new(ts(12, 0), "Hello").with_sender("Alice");
        assert_eq!(msg.sender(), Some("Alice"));
        assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_push_line() {
        let mut msg = Message::new(ts(9, 0), "hello");
        msg.push_line("world");
        assert_eq!(msg.body(), "hello\nworld");
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new(ts(12, 30), "Hi").with_sender("Bob");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Bob"));
        assert!(json.contains("2024-06-15T12:30:00"));

        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_message_deserialization_without_sender() {
        let json = r#"{"timestamp":"2024-06-15T12:00:00","body":"notice"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.sender().is_none());
        assert_eq!(msg.body(), "notice");
    }
}
