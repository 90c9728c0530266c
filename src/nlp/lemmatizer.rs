//! Lemmatization capability.
//!
//! - [`NoopLemmatizer`] backs no language; the aggregator falls back to heuristic tokens
//! - [`SnowballLemmatizer`] reduces words with Snowball stemmers (feature `lemmatize`)

use crate::error::CapabilityError;

use super::Language;

/// A token together with its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    /// The lowercased token as written
    pub surface: String,
    /// The normalized form counted in cleaned word frequencies
    pub lemma: String,
}

/// Batch lemmatization for one language at a time.
pub trait Lemmatizer: Send + Sync {
    /// Provider name reported in result metadata.
    fn name(&self) -> &'static str;

    /// Returns `true` if a model backs `language`.
    fn supports(&self, language: Language) -> bool;

    /// Lemmatizes every text of one language.
    ///
    /// Returns `Ok(None)` when no model backs the language. Otherwise the
    /// outer vector has one entry per input text, containing only alphabetic
    /// tokens (punctuation, whitespace and numbers are dropped).
    fn lemmatize_batch(
        &self,
        language: Language,
        texts: &[&str],
    ) -> Result<Option<Vec<Vec<Lemma>>>, CapabilityError>;
}

/// Lemmatizer with no model for any language.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn supports(&self, _language: Language) -> bool {
        false
    }

    fn lemmatize_batch(
        &self,
        _language: Language,
        _texts: &[&str],
    ) -> Result<Option<Vec<Vec<Lemma>>>, CapabilityError> {
        Ok(None)
    }
}

#[cfg(feature = "lemmatize")]
pub use snowball::SnowballLemmatizer;

#[cfg(feature = "lemmatize")]
mod snowball {
    use std::sync::OnceLock;

    use rust_stemmers::{Algorithm, Stemmer};

    use super::{Language, Lemma, Lemmatizer};
    use crate::error::CapabilityError;
    use crate::stats::text::tokenize;

    /// Snowball stemmers for English and Spanish.
    ///
    /// Each stemmer is built on first use and then shared read-only.
    #[derive(Default)]
    pub struct SnowballLemmatizer {
        english: OnceLock<Stemmer>,
        spanish: OnceLock<Stemmer>,
    }

    impl SnowballLemmatizer {
        /// Creates a lemmatizer; models load lazily.
        pub fn new() -> Self {
            Self::default()
        }

        fn stemmer(&self, language: Language) -> &Stemmer {
            match language {
                Language::En => self
                    .english
                    .get_or_init(|| Stemmer::create(Algorithm::English)),
                Language::Es => self
                    .spanish
                    .get_or_init(|| Stemmer::create(Algorithm::Spanish)),
            }
        }
    }

    impl std::fmt::Debug for SnowballLemmatizer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SnowballLemmatizer")
                .field("english_loaded", &self.english.get().is_some())
                .field("spanish_loaded", &self.spanish.get().is_some())
                .finish()
        }
    }

    impl Lemmatizer for SnowballLemmatizer {
        fn name(&self) -> &'static str {
            "snowball"
        }

        fn supports(&self, _language: Language) -> bool {
            true
        }

        fn lemmatize_batch(
            &self,
            language: Language,
            texts: &[&str],
        ) -> Result<Option<Vec<Vec<Lemma>>>, CapabilityError> {
            let stemmer = self.stemmer(language);

            let batch = texts
                .iter()
                .map(|text| {
                    let lowered = text.to_lowercase();
                    tokenize(&lowered)
                        .filter(|token| token.chars().all(char::is_alphabetic))
                        .map(|token| Lemma {
                            surface: token.to_string(),
                            lemma: stemmer.stem(token).into_owned(),
                        })
                        .collect()
                })
                .collect();

            Ok(Some(batch))
        }
    }

}
