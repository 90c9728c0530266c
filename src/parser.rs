//! Transcript parser: raw lines in, ordered [`Message`] records out.
//!
//! The parser is a two-state machine driven one line at a time:
//!
//! - [`ParserState::AwaitingHeader`] - no message is open; non-header lines are orphans
//! - [`ParserState::Accumulating`] - the last emitted message receives continuation lines
//!
//! A header line emits its message immediately. Continuations are discovered
//! lazily by later lines, never by looking ahead. System notices are dropped
//! and close the open message so that following lines cannot attach to it.
//!
//! # Example
//!
//! ```rust
//! use chatstats::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::new();
//! let messages = parser.parse_str("1/1/23, 9:00 - Bob: hello\nworld");
//!
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].body(), "hello\nworld");
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::Message;
use crate::config::ParserConfig;
use crate::decode::{Encoding, decode_transcript};
use crate::error::Result;
use crate::parsing::whatsapp::{SystemMessageFilter, match_header, parse_header_timestamp};

/// State of the line-by-line parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No message is open.
    AwaitingHeader,
    /// The most recently emitted message accepts continuation lines.
    Accumulating,
}

/// Counts of what happened to each non-empty line during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Messages emitted
    pub messages: usize,
    /// Continuation lines appended to a message
    pub continuation_lines: usize,
    /// Header lines dropped as system notices
    pub system_notices: usize,
    /// Header lines whose date matched no candidate format
    pub unparseable_headers: usize,
    /// Non-header lines with no open message
    pub orphan_lines: usize,
}

/// Parser for plain-text chat exports.
///
/// Never fails on malformed text: bad lines are dropped and parsing continues.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: ParserConfig,
    filter: SystemMessageFilter,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let filter =
            SystemMessageFilter::new().with_patterns(config.extra_system_patterns.iter().cloned());
        Self { config, filter }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses any sequence of lines, preserving their order.
    pub fn parse_lines<I, S>(&self, lines: I) -> Vec<Message>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_lines_with_summary(lines).0
    }

    /// Like [`parse_lines`](Self::parse_lines), also reporting what was dropped.
    pub fn parse_lines_with_summary<I, S>(&self, lines: I) -> (Vec<Message>, ParseSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut machine = LineMachine::new(self);
        for line in lines {
            machine.step(line.as_ref());
        }
        let (messages, summary) = machine.finish();

        debug!(
            messages = summary.messages,
            continuation_lines = summary.continuation_lines,
            system_notices = summary.system_notices,
            unparseable_headers = summary.unparseable_headers,
            orphan_lines = summary.orphan_lines,
            "parsed transcript"
        );

        (messages, summary)
    }

    /// Parses already-decoded text.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.parse_lines(content.lines())
    }

    /// Decodes bytes (UTF-8, falling back to Latin-1) and parses them.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Vec<Message> {
        let (text, encoding) = decode_transcript(bytes);
        if encoding == Encoding::Latin1 {
            debug!("transcript is not valid UTF-8, decoded as Latin-1");
        }
        self.parse_str(&text)
    }

    /// Reads a whole stream, then decodes and parses it.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Vec<Message>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.parse_bytes(&bytes))
    }

    /// Reads and parses a transcript file.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Message>> {
        let bytes = fs::read(path)?;
        Ok(self.parse_bytes(&bytes))
    }

    fn is_system_message(&self, sender: Option<&str>, body: &str) -> bool {
        self.config.skip_system_messages && self.filter.is_notice(sender, body)
    }
}

/// One parse run: the state plus everything emitted so far.
struct LineMachine<'p> {
    parser: &'p TranscriptParser,
    state: ParserState,
    messages: Vec<Message>,
    summary: ParseSummary,
}

impl<'p> LineMachine<'p> {
    fn new(parser: &'p TranscriptParser) -> Self {
        Self {
            parser,
            state: ParserState::AwaitingHeader,
            messages: Vec::new(),
            summary: ParseSummary::default(),
        }
    }

    /// Transition function: consumes exactly one input line.
    fn step(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        let Some(header) = match_header(line) else {
            self.continue_message(line);
            return;
        };

        // Unparseable dates drop the line and leave the state untouched.
        let Some(timestamp) = parse_header_timestamp(header.date, header.time) else {
            self.summary.unparseable_headers += 1;
            return;
        };

        let (sender, text) = header.split_sender();
        if self.parser.is_system_message(sender, text) {
            self.summary.system_notices += 1;
            self.state = ParserState::AwaitingHeader;
            return;
        }

        self.messages.push(Message::with_metadata(
            timestamp,
            sender.map(str::to_string),
            text,
        ));
        self.summary.messages += 1;
        self.state = ParserState::Accumulating;
    }

    fn continue_message(&mut self, line: &str) {
        match (self.state, self.messages.last_mut()) {
            (ParserState::Accumulating, Some(current)) => {
                current.push_line(line);
                self.summary.continuation_lines += 1;
            }
            _ => self.summary.orphan_lines += 1,
        }
    }

    fn finish(self) -> (Vec<Message>, ParseSummary) {
        (self.messages, self.summary)
    }
}
