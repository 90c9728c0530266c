//! Shared parsing utilities.
//!
//! This module contains the line-level building blocks used by
//! [`TranscriptParser`](crate::parser::TranscriptParser).

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{HeaderLine, SystemMessageFilter, match_header, parse_header_timestamp};
