//! Command-line interface definition using clap.
//!
//! [`Args`] maps flags onto the library's config structs, so the binary
//! stays a thin wrapper:
//!
//! ```rust
//! use chatstats::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstats", "chat.txt", "--top-words", "5"]);
//! assert_eq!(args.analysis_config().top_words, 5);
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AnalysisConfig, OutputConfig};

/// Compute activity, conversation, word, emoji and sentiment statistics
/// from an exported chat transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt -o stats.json --compact
    chatstats chat.txt --no-nlp --top-words 50
    RUST_LOG=chatstats=debug chatstats chat.txt")]
pub struct Args {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Path to the JSON result
    #[arg(short, long, default_value = "chat_stats.json")]
    pub output: PathBuf,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Skip lemmatization and sentiment, use heuristics only
    #[arg(long)]
    pub no_nlp: bool,

    /// Size of the word rankings
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top_words: usize,

    /// Size of the emoji rankings
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top_emojis: usize,
}

impl Args {
    /// Analysis settings selected by the flags.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new()
            .with_top_words(self.top_words)
            .with_top_emojis(self.top_emojis)
    }

    /// Output settings selected by the flags.
    pub fn output_config(&self) -> OutputConfig {
        if self.compact {
            OutputConfig::new().compact()
        } else {
            OutputConfig::new()
        }
    }
}
