//! Configuration types for parsing, analysis and output.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - transcript parser settings
//! - [`AnalysisConfig`] - aggregator thresholds and top-N sizes
//! - [`OutputConfig`] - JSON writer settings
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_top_words(30)
//!     .with_conversation_gap_secs(3 * 3600);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatstats::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_extra_system_pattern("pinned a message");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Drop protocol/administrative notices (default: true)
    pub skip_system_messages: bool,

    /// Additional lowercase substrings treated as system notices (default: empty)
    pub extra_system_patterns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: true,
            extra_system_patterns: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Adds a substring that marks a body as a system notice.
    #[must_use]
    pub fn with_extra_system_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_system_patterns
            .push(pattern.into().trim().to_lowercase());
        self
    }
}

/// Thresholds and sizes used by the statistics aggregator.
///
/// The response-latency window and the conversation gap share a default of
/// two hours but are tuned independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A gap of at least this many seconds starts a new conversation (default: 7200)
    pub conversation_gap_secs: i64,

    /// Replies must arrive strictly later than this (default: 5)
    pub response_min_secs: i64,

    /// Replies must arrive strictly sooner than this (default: 7200)
    pub response_max_secs: i64,

    /// Silent days tolerated inside a streak (default: 1)
    pub streak_max_gap_days: i64,

    /// Size of the word rankings (default: 10)
    pub top_words: usize,

    /// Size of the emoji rankings (default: 10)
    pub top_emojis: usize,

    /// Tokens inspected for language detection (default: 60)
    pub language_sample_tokens: usize,

    /// Shorter tokens are excluded from cleaned word counts (default: 2)
    pub min_token_chars: usize,

    /// Literal placeholders for omitted attachments
    pub media_markers: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            conversation_gap_secs: 2 * 60 * 60,
            response_min_secs: 5,
            response_max_secs: 2 * 60 * 60,
            streak_max_gap_days: 1,
            top_words: 10,
            top_emojis: 10,
            language_sample_tokens: 60,
            min_token_chars: 2,
            media_markers: vec!["<Media omitted>".into(), "<Multimedia omitido>".into()],
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the conversation segmentation gap.
    #[must_use]
    pub fn with_conversation_gap_secs(mut self, secs: i64) -> Self {
        self.conversation_gap_secs = secs;
        self
    }

    /// Sets the open interval a reply latency must fall into.
    #[must_use]
    pub fn with_response_window(mut self, min_secs: i64, max_secs: i64) -> Self {
        self.response_min_secs = min_secs;
        self.response_max_secs = max_secs;
        self
    }

    /// Sets how many silent days a streak tolerates.
    #[must_use]
    pub fn with_streak_max_gap_days(mut self, days: i64) -> Self {
        self.streak_max_gap_days = days;
        self
    }

    /// Sets the size of the word rankings.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the size of the emoji rankings.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Replaces the media placeholder markers.
    #[must_use]
    pub fn with_media_markers(mut self, markers: Vec<String>) -> Self {
        self.media_markers = markers;
        self
    }

    /// Checks that thresholds are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.conversation_gap_secs <= 0 {
            return Err(ChatstatsError::invalid_config(
                "conversation_gap_secs",
                "must be positive",
            ));
        }
        if self.response_min_secs < 0 || self.response_max_secs <= self.response_min_secs {
            return Err(ChatstatsError::invalid_config(
                "response_max_secs",
                format!(
                    "window ({}, {}) is empty",
                    self.response_min_secs, self.response_max_secs
                ),
            ));
        }
        if self.streak_max_gap_days < 0 {
            return Err(ChatstatsError::invalid_config(
                "streak_max_gap_days",
                "must not be negative",
            ));
        }
        if self.top_words == 0 {
            return Err(ChatstatsError::invalid_config(
                "top_words",
                "must be greater than zero",
            ));
        }
        if self.top_emojis == 0 {
            return Err(ChatstatsError::invalid_config(
                "top_emojis",
                "must be greater than zero",
            ));
        }
        if self.media_markers.iter().any(String::is_empty) {
            return Err(ChatstatsError::invalid_config(
                "media_markers",
                "markers must not be empty",
            ));
        }
        Ok(())
    }
}

/// Configuration for the JSON writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Indent the JSON output (default: true)
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits single-line JSON.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert!(config.skip_system_messages);
        assert!(config.extra_system_patterns.is_empty());
    }

    #[test]
    fn test_parser_config_extra_pattern_is_normalized() {
        let config = ParserConfig::new().with_extra_system_pattern("  Pinned A Message ");
        assert_eq!(config.extra_system_patterns, vec!["pinned a message"]);
    }

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.conversation_gap_secs, 7200);
        assert_eq!(config.response_min_secs, 5);
        assert_eq!(config.response_max_secs, 7200);
        assert_eq!(config.streak_max_gap_days, 1);
        assert_eq!(config.top_words, 10);
        assert_eq!(config.top_emojis, 10);
        assert!(config.media_markers.contains(&"<Media omitted>".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_top_words(5)
            .with_top_emojis(3)
            .with_response_window(1, 600);
        assert_eq!(config.top_words, 5);
        assert_eq!(config.top_emojis, 3);
        assert_eq!(config.response_max_secs, 600);
    }

    #[test]
    fn test_analysis_config_rejects_empty_window() {
        let config = AnalysisConfig::new().with_response_window(100, 100);
        let err = config.validate().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_analysis_config_rejects_zero_top_n() {
        assert!(AnalysisConfig::new().with_top_words(0).validate().is_err());
        assert!(AnalysisConfig::new().with_top_emojis(0).validate().is_err());
    }

    #[test]
    fn test_analysis_config_rejects_non_positive_gap() {
        assert!(
            AnalysisConfig::new()
                .with_conversation_gap_secs(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_output_config_compact() {
        assert!(OutputConfig::default().pretty);
        assert!(!OutputConfig::new().compact().pretty);
    }
}
