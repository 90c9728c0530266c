//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers every
//! failure the library can surface. Malformed transcript text is never one of
//! them: the parser recovers from bad lines by dropping them, and the
//! aggregator treats empty input as a valid "no data" result.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Optional NLP providers** report [`CapabilityError`], which never
//!   leaves the aggregator: it is absorbed and recorded in the result metadata

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing the result)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while writing the analysis result.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },
}

/// Failure raised by an optional capability provider.
///
/// The aggregator catches these and degrades the affected fields instead of
/// aborting the whole analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{provider} failed: {reason}")]
pub struct CapabilityError {
    /// Provider name (e.g. "vader", "snowball")
    provider: &'static str,
    /// Description of the failure
    reason: String,
}

impl CapabilityError {
    /// Creates a processing failure for the named provider.
    pub fn failed(provider: &'static str, reason: impl Into<String>) -> Self {
        CapabilityError {
            provider,
            reason: reason.into(),
        }
    }

    /// Returns the name of the provider that failed.
    pub fn provider(&self) -> &'static str {
        self.provider
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatstatsError::InvalidConfig { .. })
    }

}

// ============================================================================
// Tests
// ============================================================================
