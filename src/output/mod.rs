//! Result writers.
//!
//! - [`to_json`] - serialize an [`AnalysisResult`](crate::stats::AnalysisResult) to a string
//! - [`write_json`] - write it to a file
//! - [`write_json_to`] - write it to any [`Write`](std::io::Write) sink
//!
//! # Example
//!
//! ```rust
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::config::OutputConfig;
//! use chatstats::output::to_json;
//! use chatstats::stats::analyze_default;
//!
//! let result = analyze_default(&[]);
//! let json = to_json(&result, &OutputConfig::new().compact())?;
//!
//! assert!(json.starts_with(r#"{"total_mensajes":0"#));
//! # Ok(())
//! # }
//! ```

mod json_writer;

pub use json_writer::{to_json, write_json, write_json_to};
