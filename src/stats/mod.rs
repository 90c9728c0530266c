//! Statistics aggregator.
//!
//! [`analyze`] turns a list of messages into one [`AnalysisResult`]. It sorts
//! the messages, makes a single pass for counts, then runs the
//! post-passes (segmentation, streak, lexical pipeline, sentiment).
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//! use chatstats::nlp::Capabilities;
//! use chatstats::parser::TranscriptParser;
//! use chatstats::stats::analyze;
//!
//! let messages = TranscriptParser::new().parse_str(
//!     "1/1/23, 9:00 - Ana: hola\n1/1/23, 9:05 - Luis: buenas",
//! );
//! let result = analyze(&messages, &AnalysisConfig::default(), &Capabilities::fallback());
//!
//! assert_eq!(result.total_messages, 2);
//! assert_eq!(result.participants, vec!["Ana", "Luis"]);
//! ```

pub mod conversation;
pub mod counter;
pub mod duration;
pub mod lexical;
pub mod result;
pub mod sentiment;
pub mod streak;
pub mod text;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Timelike};
use tracing::{debug, warn};

use crate::Message;
use crate::config::AnalysisConfig;
use crate::nlp::Capabilities;
use crate::nlp::sentiment::DISABLED_ENGINE;

pub use counter::FrequencyCounter;
pub use lexical::WordMode;
pub use result::*;

use self::conversation::{rank_initiators, response_latencies, segment};
use self::duration::{format_duration, format_elapsed};
use self::sentiment::{SentimentTally, score_messages};
use self::streak::longest_streak;

const DAY_KEY: &str = "%Y-%m-%d";
const DISPLAY_DATE: &str = "%d-%m-%Y";
const DISPLAY_DATETIME: &str = "%d-%m-%Y %H:%M";

/// Counts gathered in the linear pass.
#[derive(Default)]
struct Tallies {
    per_person: FrequencyCounter<String>,
    per_day: BTreeMap<NaiveDate, usize>,
    hours: HourCounts,
    weekdays: WeekdayCounts,
    hour_order: FrequencyCounter<u32>,
    weekday_order: FrequencyCounter<usize>,
    words: FrequencyCounter<String>,
    total_words: usize,
    words_per_person: BTreeMap<String, usize>,
    emojis: FrequencyCounter<String>,
    emojis_per_person: BTreeMap<String, FrequencyCounter<String>>,
    media: usize,
    links: usize,
}

impl Tallies {
    /// Records one message and returns its link and media stripped text.
    fn record(&mut self, msg: &Message, config: &AnalysisConfig) -> String {
        let hour = msg.timestamp.hour();
        let weekday = msg.timestamp.weekday().num_days_from_monday() as usize;

        *self.per_day.entry(msg.date()).or_default() += 1;
        self.hours.0[hour as usize] += 1;
        self.hour_order.add(hour);
        self.weekdays.0[weekday] += 1;
        self.weekday_order.add(weekday);

        let sender = msg.sender();
        if let Some(name) = sender {
            self.per_person.add(name.to_string());
        }

        let (text, has_media) = text::strip_media(msg.body(), &config.media_markers);
        if has_media {
            self.media += 1;
        }
        self.links += text::count_links(&text);

        for emoji in text::emojis(&text) {
            self.emojis.add(emoji.to_string());
            if let Some(name) = sender {
                self.emojis_per_person
                    .entry(name.to_string())
                    .or_default()
                    .add(emoji.to_string());
            }
        }

        let lowered = text.to_lowercase();
        let mut word_count = 0;
        for word in text::tokenize(&lowered) {
            self.words.add(word.to_string());
            word_count += 1;
        }
        self.total_words += word_count;
        if let Some(name) = sender {
            *self.words_per_person.entry(name.to_string()).or_default() += word_count;
        }

        text::strip_links(&text).into_owned()
    }
}

/// Analyzes messages in any order.
///
/// Never fails: empty input yields zeroed fields, and a failing optional
/// capability is reported in [`NlpMetadata`] instead of aborting.
pub fn analyze(
    messages: &[Message],
    config: &AnalysisConfig,
    caps: &Capabilities,
) -> AnalysisResult {
    // Timestamp first, the rest only orders simultaneous messages so that
    // any permutation of the input yields the same result.
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.sender.cmp(&b.sender))
            .then_with(|| a.body.cmp(&b.body))
    });

    let mut tallies = Tallies::default();
    let texts: Vec<String> = sorted.iter().map(|m| tallies.record(m, config)).collect();

    let total = sorted.len();
    let participants: Vec<String> = {
        let set: BTreeSet<String> = tallies.per_person.iter().map(|(k, _)| k.clone()).collect();
        set.into_iter().collect()
    };
    let messages_per_person: BTreeMap<String, usize> = tallies
        .per_person
        .iter()
        .map(|(k, n)| (k.clone(), n))
        .collect();

    let most_active_person = tallies
        .per_person
        .max()
        .map(|(name, count)| TopPerson {
            name: Some(name),
            count,
        })
        .unwrap_or_default();
    let most_active_hour = tallies
        .hour_order
        .max()
        .map(|(hour, count)| TopHour {
            hour: Some(format!("{hour:02}")),
            count,
        })
        .unwrap_or_default();
    let most_active_weekday = tallies
        .weekday_order
        .max()
        .map(|(day, count)| TopWeekday {
            day: Some(WEEKDAY_NAMES[day].to_string()),
            count,
        })
        .unwrap_or_default();

    let active_days = tallies.per_day.len();
    let time_span = time_span(&sorted);
    // averaged over the calendar span, silent days included
    let span_days = time_span.as_ref().map_or(0, |span| span.total_days as usize);
    let mean_messages_per_day = ratio(total, span_days);

    let mean_words_per_person = messages_per_person
        .iter()
        .map(|(name, &n)| {
            let words = tallies.words_per_person.get(name).copied().unwrap_or(0);
            (name.clone(), ratio(words, n))
        })
        .collect();

    let lexical = lexical::clean_words(&texts, config, caps);

    let valid = segment(&sorted, config.conversation_gap_secs);
    let ranking = rank_initiators(&valid);
    let conversation_secs: i64 = valid.iter().map(|c| c.duration_secs()).sum();
    let mean_conversation_secs = if valid.is_empty() {
        0.0
    } else {
        conversation_secs as f64 / valid.len() as f64
    };
    let mean_conversation = if valid.is_empty() {
        "0 min".to_string()
    } else {
        format_duration(mean_conversation_secs)
    };
    let conversations = valid
        .iter()
        .map(|c| ConversationSummary {
            start: c.start,
            end: c.end,
            duration_secs: c.duration_secs(),
            duration: format_duration(c.duration_secs() as f64),
            initiator: c.initiator.clone(),
            messages: c.messages,
        })
        .collect();

    let response_times = response_latencies(&sorted, config.response_min_secs, config.response_max_secs)
        .into_iter()
        .map(|(name, latency)| {
            let mean = latency.mean_secs();
            (
                name,
                ResponseTime {
                    mean_secs: round_to(mean, 2),
                    mean_formatted: format_duration(mean),
                    samples: latency.samples,
                },
            )
        })
        .collect();

    let active_dates: BTreeSet<NaiveDate> = tallies.per_day.keys().copied().collect();
    let streak = longest_streak(&active_dates, config.streak_max_gap_days)
        .map(|s| StreakSummary {
            days: s.days(),
            start: Some(s.start.format(DISPLAY_DATE).to_string()),
            end: Some(s.end.format(DISPLAY_DATE).to_string()),
        })
        .unwrap_or_default();

    let engine = caps.sentiment();
    let (tally, engine_name, sentiment_failed) = match score_messages(&sorted, &texts, engine) {
        Ok(tally) => (tally, engine.name(), false),
        Err(err) => {
            warn!(engine = engine.name(), error = %err, "sentiment scoring failed, disabling for this run");
            (SentimentTally::default(), DISABLED_ENGINE, true)
        }
    };

    debug!(
        messages = total,
        participants = participants.len(),
        conversations = valid.len(),
        scored = tally.global.count(),
        "analysis complete"
    );

    AnalysisResult {
        total_messages: total,
        participants,
        messages_per_person,
        most_active_person,
        messages_per_day: tallies
            .per_day
            .iter()
            .map(|(day, &n)| (day.format(DAY_KEY).to_string(), n))
            .collect(),
        messages_per_hour: tallies.hours,
        messages_per_weekday: tallies.weekdays,
        most_active_hour,
        most_active_weekday,
        active_days,
        mean_messages_per_day: round_to(mean_messages_per_day, 2),
        time_span,
        mean_words_per_message: round_to(ratio(tallies.total_words, total), 2),
        mean_words_per_person,
        top_words: tallies.words.most_common(config.top_words),
        top_words_cleaned: lexical.cleaned.most_common(config.top_words),
        media_count: tallies.media,
        link_count: tallies.links,
        emoji_count: tallies.emojis.total(),
        top_emojis: tallies.emojis.most_common(config.top_emojis),
        top_emojis_per_person: tallies
            .emojis_per_person
            .iter()
            .map(|(name, counter)| (name.clone(), counter.most_common(config.top_emojis)))
            .collect(),
        conversations,
        mean_conversation,
        mean_conversation_secs: round_to(mean_conversation_secs, 2),
        initiators: InitiatorStats {
            percentages: ranking
                .percentages
                .iter()
                .map(|(name, pct)| (name.clone(), format!("{pct:.1}%")))
                .collect(),
            counts: ranking.counts,
            podium: ranking.podium,
            total_conversations: ranking.total,
        },
        response_times,
        total_chat_hours: round_to(conversation_secs as f64 / 3600.0, 2),
        streak,
        sentiment_per_person: tally
            .per_person
            .iter()
            .map(|(name, t)| {
                (name.clone(), PersonSentiment {
                    mean_compound: round_to(t.mean(), 4),
                    positive: t.positive,
                    neutral: t.neutral,
                    negative: t.negative,
                    total: t.count(),
                })
            })
            .collect(),
        sentiment_per_day: tally
            .per_day
            .iter()
            .map(|(day, t)| (day.format(DAY_KEY).to_string(), round_to(t.mean(), 4)))
            .collect(),
        sentiment: GlobalSentiment {
            engine: engine_name.to_string(),
            mean_compound: round_to(tally.global.mean(), 4),
            positive: tally.global.positive,
            neutral: tally.global.neutral,
            negative: tally.global.negative,
            scored: tally.global.count(),
            coverage: round_to(ratio(tally.global.count(), total) * 100.0, 2),
        },
        languages: lexical
            .languages
            .iter()
            .map(|(lang, &n)| (lang.code().to_string(), n))
            .collect(),
        nlp: NlpMetadata {
            lemmatizer: lexical
                .lemmatized
                .iter()
                .map(|(lang, &active)| (lang.code().to_string(), active))
                .collect(),
            lemmatizer_provider: caps.lemmatizer().name().to_string(),
            sentiment_engine: engine_name.to_string(),
            word_mode: lexical.mode.as_str().to_string(),
            degraded: lexical.degraded || sentiment_failed,
        },
    }
}

/// Analyzes with default thresholds and the process-wide capabilities.
pub fn analyze_default(messages: &[Message]) -> AnalysisResult {
    analyze(messages, &AnalysisConfig::default(), Capabilities::shared())
}

fn time_span(sorted: &[&Message]) -> Option<TimeSpan> {
    let (first, last) = (sorted.first()?, sorted.last()?);
    let elapsed_secs = (last.timestamp - first.timestamp).num_seconds();

    Some(TimeSpan {
        start: first.timestamp.format(DISPLAY_DATETIME).to_string(),
        end: last.timestamp.format(DISPLAY_DATETIME).to_string(),
        elapsed: format_elapsed(elapsed_secs),
        elapsed_secs,
        total_days: (last.date() - first.date()).num_days() + 1,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::nlp::SentimentEngine;
    use chrono::NaiveDateTime;
    use std::sync::Arc;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn msg(at: &str, sender: &str, body: &str) -> Message {
        Message::with_metadata(ts(at), Some(sender.into()), body)
    }

    fn run(messages: &[Message]) -> AnalysisResult {
        analyze(messages, &AnalysisConfig::default(), &Capabilities::fallback())
    }

    struct FixedSentiment(f64);

    impl SentimentEngine for FixedSentiment {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn compound(&self, _text: &str) -> Result<Option<f64>, CapabilityError> {
            Ok(Some(self.0))
        }
    }

    struct PanickySentiment;

    impl SentimentEngine for PanickySentiment {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn compound(&self, _text: &str) -> Result<Option<f64>, CapabilityError> {
            Err(CapabilityError::failed("panicky", "scoring crashed"))
        }
    }

    #[test]
    fn test_empty_input() {
        let result = run(&[]);
        assert_eq!(result.total_messages, 0);
        assert!(result.participants.is_empty());
        assert!(result.conversations.is_empty());
        assert!(result.time_span.is_none());
        assert_eq!(result.streak.days, 0);
        assert_eq!(result.mean_conversation, "0 min");
        assert_eq!(result.most_active_person, TopPerson::default());
        assert_eq!(result.messages_per_hour.total(), 0);
        assert_eq!(result.sentiment.coverage, 0.0);
    }

    #[test]
    fn test_basic_counts() {
        let result = run(&[
            msg("2023-01-02 09:00:00", "Ana", "hola 😂 https://x.com"),
            msg("2023-01-02 09:01:00", "Luis", "<Media omitted>"),
            msg("2023-01-02 21:30:00", "Ana", "pizza pizza"),
        ]);

        assert_eq!(result.total_messages, 3);
        assert_eq!(result.participants, vec!["Ana", "Luis"]);
        assert_eq!(result.messages_per_person["Ana"], 2);
        assert_eq!(result.most_active_person.name.as_deref(), Some("Ana"));
        assert_eq!(result.messages_per_hour.0[9], 2);
        assert_eq!(result.most_active_hour.hour.as_deref(), Some("09"));
        assert_eq!(result.most_active_weekday.day.as_deref(), Some("Lunes"));
        assert_eq!(result.media_count, 1);
        assert_eq!(result.link_count, 1);
        assert_eq!(result.emoji_count, 1);
        assert_eq!(result.top_words[0], ("pizza".to_string(), 2));
        assert_eq!(result.active_days, 1);
        assert_eq!(result.mean_messages_per_day, 3.0);
    }

    #[test]
    fn test_mean_per_day_counts_silent_days() {
        let result = run(&[
            msg("2023-03-01 10:00:00", "A", "a"),
            msg("2023-03-01 10:05:00", "B", "b"),
            msg("2023-03-05 09:00:00", "A", "c"),
        ]);
        assert_eq!(result.active_days, 2);
        assert_eq!(result.time_span.as_ref().unwrap().total_days, 5);
        assert_eq!(result.mean_messages_per_day, 0.6);
    }

    #[test]
    fn test_count_invariant() {
        let result = run(&[
            msg("2023-01-01 00:10:00", "A", "x"),
            msg("2023-01-03 13:00:00", "B", "y"),
            msg("2023-01-03 23:59:00", "A", "z"),
        ]);
        let per_day: usize = result.messages_per_day.values().sum();
        assert_eq!(per_day, 3);
        assert_eq!(result.messages_per_hour.total(), 3);
        assert_eq!(result.messages_per_weekday.total(), 3);
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = vec![
            msg("2023-01-01 10:00:00", "A", "hola"),
            msg("2023-01-01 10:00:00", "B", "hey"),
            msg("2023-01-01 10:02:00", "A", "todo bien"),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn test_time_span_and_streak() {
        let result = run(&[
            msg("2023-03-01 10:00:00", "A", "a"),
            msg("2023-03-02 10:00:00", "B", "b"),
            msg("2023-03-04 12:00:00", "A", "c"),
        ]);
        let span = result.time_span.unwrap();
        assert_eq!(span.start, "01-03-2023 10:00");
        assert_eq!(span.total_days, 4);
        assert_eq!(span.elapsed, "3 days, 2:00:00");
        assert_eq!(result.streak.days, 4);
        assert_eq!(result.streak.start.as_deref(), Some("01-03-2023"));
    }

    #[test]
    fn test_sentiment_disabled_keeps_other_metrics() {
        let result = run(&[
            msg("2023-01-01 10:00:00", "A", "great"),
            msg("2023-01-01 10:01:00", "B", "awful"),
        ]);
        assert_eq!(result.sentiment.engine, "disabled");
        assert!(result.sentiment_per_person.is_empty());
        assert!(result.sentiment_per_day.is_empty());
        assert_eq!(result.total_messages, 2);
        assert_eq!(result.conversations.len(), 1);
        assert!(!result.nlp.degraded);
    }

    #[test]
    fn test_sentiment_coverage_counts_all_messages() {
        let caps = Capabilities::fallback().with_sentiment(Arc::new(FixedSentiment(0.6)));
        let messages = vec![
            msg("2023-01-01 10:00:00", "A", "great"),
            Message::new(ts("2023-01-01 10:01:00"), "notice"),
            msg("2023-01-01 10:02:00", "B", "<Media omitted>"),
            msg("2023-01-01 10:03:00", "B", "nice"),
        ];
        let result = analyze(&messages, &AnalysisConfig::default(), &caps);
        assert_eq!(result.sentiment.engine, "fixed");
        assert_eq!(result.sentiment.scored, 2);
        assert_eq!(result.sentiment.coverage, 50.0);
        assert_eq!(result.sentiment.positive, 2);
        assert_eq!(result.sentiment_per_person["B"].total, 1);
        assert_eq!(result.sentiment_per_day["2023-01-01"], 0.6);
    }

    #[test]
    fn test_sentiment_failure_degrades() {
        let caps = Capabilities::fallback().with_sentiment(Arc::new(PanickySentiment));
        let result = analyze(
            &[msg("2023-01-01 10:00:00", "A", "great")],
            &AnalysisConfig::default(),
            &caps,
        );
        assert_eq!(result.sentiment.engine, "disabled");
        assert_eq!(result.nlp.sentiment_engine, "disabled");
        assert!(result.nlp.degraded);
        assert!(result.sentiment_per_person.is_empty());
        assert_eq!(result.total_messages, 1);
    }

    #[test]
    fn test_conversations_and_responses() {
        let result = run(&[
            msg("2023-01-01 10:00:00", "A", "hola"),
            msg("2023-01-01 10:01:00", "B", "hola"),
            msg("2023-01-01 10:02:00", "B", "que tal"),
            msg("2023-01-01 14:00:00", "B", "sigo"),
            msg("2023-01-01 14:30:00", "A", "ok"),
        ]);
        assert_eq!(result.initiators.total_conversations, 2);
        assert_eq!(result.initiators.percentages["A"], "50.0%");
        assert_eq!(result.conversations[0].duration_secs, 120);
        assert_eq!(result.response_times["B"].samples, 1);
        assert_eq!(result.response_times["A"].mean_secs, 1800.0);
        assert_eq!(result.response_times["A"].mean_formatted, "30.0 min");
        assert_eq!(result.mean_conversation_secs, 960.0);
        assert_eq!(result.mean_conversation, "16.0 min");
    }

    #[test]
    fn test_words_per_person() {
        let result = run(&[
            msg("2023-01-01 10:00:00", "A", "uno dos tres"),
            msg("2023-01-01 10:01:00", "A", "cuatro"),
            msg("2023-01-01 10:02:00", "B", "😂"),
        ]);
        assert_eq!(result.mean_words_per_person["A"], 2.0);
        assert_eq!(result.mean_words_per_person["B"], 0.0);
        assert_eq!(result.top_emojis_per_person["B"][0].1, 1);
        assert!(!result.top_emojis_per_person.contains_key("A"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.0 / 3.0, 4), 0.6667);
    }
}
