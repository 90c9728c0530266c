//! Sentiment scoring capability.
//!
//! - [`DisabledSentiment`] scores nothing; sentiment fields stay empty
//! - [`VaderSentiment`] uses the VADER lexicon (feature `sentiment`)

use crate::error::CapabilityError;

/// Compound scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Polarity class of a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    /// Classifies a compound score in `[-1, 1]`.
    pub fn classify(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Polarity::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Scores one text at a time.
pub trait SentimentEngine: Send + Sync {
    /// Engine name reported as `sentimiento_global.engine`.
    fn name(&self) -> &'static str;

    /// Compound polarity in `[-1, 1]`, or `Ok(None)` when the engine scores nothing.
    fn compound(&self, text: &str) -> Result<Option<f64>, CapabilityError>;
}

/// Engine used when no sentiment model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSentiment;

/// Engine name of [`DisabledSentiment`].
pub const DISABLED_ENGINE: &str = "disabled";

impl SentimentEngine for DisabledSentiment {
    fn name(&self) -> &'static str {
        DISABLED_ENGINE
    }

    fn compound(&self, _text: &str) -> Result<Option<f64>, CapabilityError> {
        Ok(None)
    }
}

#[cfg(feature = "sentiment")]
pub use vader::VaderSentiment;

#[cfg(feature = "sentiment")]
mod vader {
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::OnceLock;

    use vader_sentiment::SentimentIntensityAnalyzer;

    use super::SentimentEngine;
    use crate::error::CapabilityError;

    /// VADER lexicon scorer, loaded on first use and shared read-only.
    #[derive(Default)]
    pub struct VaderSentiment {
        analyzer: OnceLock<SentimentIntensityAnalyzer<'static>>,
    }

    impl VaderSentiment {
        /// Creates an engine; the lexicon loads lazily.
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl std::fmt::Debug for VaderSentiment {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("VaderSentiment")
                .field("loaded", &self.analyzer.get().is_some())
                .finish()
        }
    }

    impl SentimentEngine for VaderSentiment {
        fn name(&self) -> &'static str {
            "vader"
        }

        fn compound(&self, text: &str) -> Result<Option<f64>, CapabilityError> {
            let analyzer = self
                .analyzer
                .get_or_init(|| SentimentIntensityAnalyzer::new());

            // The analyzer indexes into token windows and can panic on odd input.
            let scores = panic::catch_unwind(AssertUnwindSafe(|| analyzer.polarity_scores(text)))
                .map_err(|_| CapabilityError::failed("vader", "analyzer panicked"))?;

            scores
                .get("compound")
                .copied()
                .map(Some)
                .ok_or_else(|| CapabilityError::failed("vader", "no compound score"))
        }
    }

}
