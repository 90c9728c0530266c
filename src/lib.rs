//! # Chatstats
//!
//! A Rust library for turning exported chat transcripts into a statistical
//! summary: activity histograms, conversation structure, word and emoji
//! usage, and optional sentiment.
//!
//! ## Overview
//!
//! Processing happens in two steps:
//! - **Parsing**: [`TranscriptParser`](parser::TranscriptParser) turns raw
//!   lines into ordered [`Message`] records, merging continuation lines and
//!   dropping system notices
//! - **Aggregation**: [`analyze`](stats::analyze) computes one
//!   [`AnalysisResult`](stats::AnalysisResult) from those messages
//!
//! Lemmatization and sentiment scoring are optional capabilities, chosen once
//! through [`Capabilities`](nlp::Capabilities) and passed into the aggregator.
//! Without them the word counts fall back to stop-word heuristics and the
//! sentiment fields stay empty; the result's metadata records which mode ran.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = TranscriptParser::new().parse_file("chat.txt".as_ref())?;
//!     let result = analyze(&messages, &AnalysisConfig::default(), Capabilities::shared());
//!
//!     write_json(&result, "stats.json", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - line-driven two-state parser
//! - [`parsing`] - header matching, date-format candidates, system notice filter
//! - [`decode`] - UTF-8 with Latin-1 fallback
//! - [`stats`] - the aggregator and its output tree
//! - [`nlp`] - stop words, lemmatizer and sentiment capabilities
//! - [`output`] - JSON writers
//! - [`config`] - parser, analysis and output settings
//! - [`error`] - unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod message;
pub mod nlp;
pub mod output;
pub mod parser;
pub mod parsing;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatstatsError, Result};

    pub use crate::config::{AnalysisConfig, OutputConfig, ParserConfig};

    pub use crate::parser::TranscriptParser;

    pub use crate::nlp::Capabilities;

    pub use crate::stats::{AnalysisResult, analyze, analyze_default};

    pub use crate::output::{to_json, write_json};
}
