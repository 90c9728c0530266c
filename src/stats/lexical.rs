//! Cleaned word frequencies: language detection, lemmatization and
//! stop-word filtering.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::counter::FrequencyCounter;
use super::text::{is_numeric, tokenize};
use crate::config::AnalysisConfig;
use crate::error::CapabilityError;
use crate::nlp::{Capabilities, Language, Lemma, StopWords};

/// Whether cleaned words come from lemmas or plain tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMode {
    /// Lowercase tokens filtered by stop words, length and digits
    Heuristic,
    /// At least one language group went through the lemmatizer
    Nlp,
}

impl WordMode {
    /// Name reported in `nlp_metadata.word_mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            WordMode::Heuristic => "heuristic",
            WordMode::Nlp => "nlp",
        }
    }
}

/// Result of the lexical pipeline.
#[derive(Debug, Clone)]
pub struct LexicalOutcome {
    /// Cleaned word counts, in message order for tie-breaking
    pub cleaned: FrequencyCounter<String>,
    /// Messages per detected language
    pub languages: BTreeMap<Language, usize>,
    /// Languages whose words went through the lemmatizer in this run
    pub lemmatized: BTreeMap<Language, bool>,
    /// Which kind of words ended up in `cleaned`
    pub mode: WordMode,
    /// A provider failed and its output was replaced by the fallback
    pub degraded: bool,
}

/// Builds cleaned word counts from stripped message texts.
///
/// Texts are grouped by detected language and each group is lemmatized in
/// one batch. Groups the lemmatizer does not cover, or on which it fails,
/// fall back to lowercase tokens. Counting happens in message order so that
/// ranking ties stay deterministic.
pub fn clean_words(texts: &[String], config: &AnalysisConfig, caps: &Capabilities) -> LexicalOutcome {
    let stop_words = caps.stop_words();
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    let mut groups: BTreeMap<Language, Vec<usize>> = BTreeMap::new();
    for (idx, text) in lowered.iter().enumerate() {
        let tokens: Vec<&str> = tokenize(text).collect();
        let language = stop_words.detect_language(&tokens, config.language_sample_tokens);
        groups.entry(language).or_default().push(idx);
    }

    let mut per_message: Vec<Vec<String>> = vec![Vec::new(); texts.len()];
    let mut used: BTreeMap<Language, Option<bool>> = BTreeMap::new();
    let mut degraded = false;

    for &language in Language::all() {
        let members = groups.get(&language).map(Vec::as_slice).unwrap_or_default();
        if members.is_empty() {
            used.insert(language, None);
            continue;
        }
        let batch: Vec<&str> = members.iter().map(|&i| lowered[i].as_str()).collect();

        let lemmas = if degraded {
            None
        } else {
            lemmatize_group(caps, language, &batch).unwrap_or_else(|err| {
                warn!(language = %language, error = %err, "lemmatizer failed, using plain tokens");
                degraded = true;
                None
            })
        };
        used.insert(language, Some(lemmas.is_some()));

        match lemmas {
            Some(lemmas) => {
                for (&idx, words) in members.iter().zip(lemmas) {
                    per_message[idx] = keep_lemmas(words, stop_words, config.min_token_chars);
                }
            }
            None => {
                for &idx in members {
                    per_message[idx] = keep_tokens(&lowered[idx], stop_words, config.min_token_chars);
                }
            }
        }
    }

    // Languages without messages report whether the lemmatizer could have run.
    let lemmatized: BTreeMap<Language, bool> = used
        .into_iter()
        .map(|(language, used)| {
            let active = used.unwrap_or_else(|| !degraded && caps.lemmatizer().supports(language));
            (language, active)
        })
        .collect();

    let cleaned: FrequencyCounter<String> = per_message.into_iter().flatten().collect();
    let languages = groups.iter().map(|(lang, m)| (*lang, m.len())).collect();
    let mode = if lemmatized.values().any(|&active| active) {
        WordMode::Nlp
    } else {
        WordMode::Heuristic
    };

    debug!(
        mode = mode.as_str(),
        distinct = cleaned.len(),
        degraded,
        "cleaned word counts built"
    );

    LexicalOutcome {
        cleaned,
        languages,
        lemmatized,
        mode,
        degraded,
    }
}

fn lemmatize_group(
    caps: &Capabilities,
    language: Language,
    batch: &[&str],
) -> Result<Option<Vec<Vec<Lemma>>>, CapabilityError> {
    let lemmatizer = caps.lemmatizer();
    match lemmatizer.lemmatize_batch(language, batch)? {
        Some(lemmas) if lemmas.len() != batch.len() => Err(CapabilityError::failed(
            lemmatizer.name(),
            format!("returned {} results for {} texts", lemmas.len(), batch.len()),
        )),
        other => Ok(other),
    }
}

fn keep_tokens(text: &str, stop_words: &StopWords, min_chars: usize) -> Vec<String> {
    tokenize(text)
        .filter(|token| token.chars().count() >= min_chars)
        .filter(|token| !is_numeric(token))
        .filter(|token| !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

fn keep_lemmas(lemmas: Vec<Lemma>, stop_words: &StopWords, min_chars: usize) -> Vec<String> {
    lemmas
        .into_iter()
        .filter(|l| l.lemma.chars().all(char::is_alphabetic))
        .map(|l| Lemma {
            lemma: l.lemma.to_lowercase(),
            ..l
        })
        .filter(|l| l.lemma.chars().count() >= min_chars)
        .filter(|l| !stop_words.contains(&l.surface) && !stop_words.contains(&l.lemma))
        .map(|l| l.lemma)
        .collect()
}
