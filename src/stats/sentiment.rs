//! Sentiment accumulators per participant, per day and overall.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::Message;
use crate::error::CapabilityError;
use crate::nlp::{Polarity, SentimentEngine};

/// Running compound sum and polarity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarityTally {
    pub sum: f64,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl PolarityTally {
    fn record(&mut self, compound: f64) {
        self.sum += compound;
        match Polarity::classify(compound) {
            Polarity::Positive => self.positive += 1,
            Polarity::Neutral => self.neutral += 1,
            Polarity::Negative => self.negative += 1,
        }
    }

    /// Number of scored messages.
    pub fn count(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Mean compound score, zero when nothing was scored.
    pub fn mean(&self) -> f64 {
        match self.count() {
            0 => 0.0,
            n => self.sum / n as f64,
        }
    }
}

/// Sentiment gathered over one analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentTally {
    pub per_person: BTreeMap<String, PolarityTally>,
    pub per_day: BTreeMap<NaiveDate, PolarityTally>,
    pub global: PolarityTally,
}

/// Scores every attributed message with non-empty text.
///
/// `texts[i]` is the link and media stripped text of `messages[i]`. The first
/// engine failure aborts scoring so the caller can report the engine as
/// unavailable for the whole run.
pub fn score_messages(
    messages: &[&Message],
    texts: &[String],
    engine: &dyn SentimentEngine,
) -> Result<SentimentTally, CapabilityError> {
    let mut tally = SentimentTally::default();

    for (msg, text) in messages.iter().zip(texts) {
        let Some(sender) = msg.sender() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let Some(compound) = engine.compound(text)? else {
            continue;
        };

        tally
            .per_person
            .entry(sender.to_string())
            .or_default()
            .record(compound);
        tally.per_day.entry(msg.date()).or_default().record(compound);
        tally.global.record(compound);
    }

    Ok(tally)
}
