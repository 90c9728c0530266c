//! Optional NLP capabilities consumed by the aggregator.
//!
//! Each capability is a trait with a fallback implementation and a
//! model-backed one. A [`Capabilities`] bundle is chosen once at startup and
//! passed by reference into [`analyze`](crate::stats::analyze), so the
//! aggregator never checks for optional dependencies itself.
//!
//! | Capability | Fallback | Model-backed (feature) |
//! |------------|----------|------------------------|
//! | [`Lemmatizer`] | [`NoopLemmatizer`] | `SnowballLemmatizer` (`lemmatize`) |
//! | [`SentimentEngine`] | [`DisabledSentiment`] | `VaderSentiment` (`sentiment`) |
//!
//! Model handles load lazily through [`OnceLock`], at most once per process
//! when shared through [`Capabilities::shared`], and are used read-only
//! afterwards, so concurrent analyses can share them.
//!
//! # Example
//!
//! ```rust
//! use chatstats::nlp::Capabilities;
//!
//! let caps = Capabilities::fallback();
//! assert_eq!(caps.sentiment().name(), "disabled");
//! ```

pub mod lemmatizer;
pub mod sentiment;
pub mod stopwords;

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

pub use lemmatizer::{Lemma, Lemmatizer, NoopLemmatizer};
pub use sentiment::{DisabledSentiment, Polarity, SentimentEngine};
pub use stopwords::StopWords;

#[cfg(feature = "lemmatize")]
pub use lemmatizer::SnowballLemmatizer;
#[cfg(feature = "sentiment")]
pub use sentiment::VaderSentiment;

/// Languages the lexical pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,
    /// Spanish
    Es,
}

impl Language {
    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Es]
    }

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only providers handed to the aggregator.
#[derive(Clone)]
pub struct Capabilities {
    stop_words: Arc<StopWords>,
    lemmatizer: Arc<dyn Lemmatizer>,
    sentiment: Arc<dyn SentimentEngine>,
}

impl Capabilities {
    /// Heuristics only: no lemmatizer, sentiment disabled.
    pub fn fallback() -> Self {
        Self {
            stop_words: Arc::new(StopWords::builtin()),
            lemmatizer: Arc::new(NoopLemmatizer),
            sentiment: Arc::new(DisabledSentiment),
        }
    }

    /// Every provider compiled into this build.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut caps = Self::fallback();

        #[cfg(feature = "lemmatize")]
        {
            caps = caps.with_lemmatizer(Arc::new(SnowballLemmatizer::new()));
        }
        #[cfg(feature = "sentiment")]
        {
            caps = caps.with_sentiment(Arc::new(VaderSentiment::new()));
        }

        caps
    }

    /// Process-wide instance of [`detect`](Self::detect), built on first access.
    pub fn shared() -> &'static Capabilities {
        static SHARED: OnceLock<Capabilities> = OnceLock::new();
        SHARED.get_or_init(Self::detect)
    }

    /// Replaces the stop-word sets.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Arc::new(stop_words);
        self
    }

    /// Replaces the lemmatizer.
    #[must_use]
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Replaces the sentiment engine.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Arc<dyn SentimentEngine>) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Returns the stop-word sets.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Returns the lemmatizer.
    pub fn lemmatizer(&self) -> &dyn Lemmatizer {
        self.lemmatizer.as_ref()
    }

    /// Returns the sentiment engine.
    pub fn sentiment(&self) -> &dyn SentimentEngine {
        self.sentiment.as_ref()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("lemmatizer", &self.lemmatizer.name())
            .field("sentiment", &self.sentiment.name())
            .finish_non_exhaustive()
    }
}
