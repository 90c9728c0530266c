//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::stats::AnalysisResult;

/// Writes the result to a JSON file, creating or truncating it.
pub fn write_json(result: &AnalysisResult, path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_json_to(result, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Writes the result as JSON into `writer`, followed by a newline.
pub fn write_json_to<W: Write>(result: &AnalysisResult, mut writer: W, config: &OutputConfig) -> Result<()> {
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, result)?;
    } else {
        serde_json::to_writer(&mut writer, result)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Converts the result to a JSON string.
///
/// Same format as `write_json`, without the trailing newline.
pub fn to_json(result: &AnalysisResult, config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
