//! Conversation segmentation, initiator ranking and reply latency.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::counter::FrequencyCounter;
use crate::Message;

/// A maximal run of messages with no gap reaching the segmentation threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Sender of the first message, if known
    pub initiator: Option<String>,
    pub messages: usize,
}

impl Conversation {
    fn open(msg: &Message) -> Self {
        Self {
            start: msg.timestamp,
            end: msg.timestamp,
            initiator: msg.sender.clone(),
            messages: 1,
        }
    }

    /// Seconds between the first and last message.
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Splits time-sorted messages into conversations.
///
/// A gap of at least `gap_secs` opens a new conversation. Conversations of
/// zero duration (a single message, or several sharing one timestamp) are
/// not returned.
pub fn segment(messages: &[&Message], gap_secs: i64) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();

    for msg in messages {
        match conversations.last_mut() {
            Some(conv) if (msg.timestamp - conv.end).num_seconds() < gap_secs => {
                conv.end = msg.timestamp;
                conv.messages += 1;
            }
            _ => conversations.push(Conversation::open(msg)),
        }
    }

    conversations.retain(|c| c.duration_secs() > 0);
    conversations
}

/// Conversation counts per initiator.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatorRanking {
    pub counts: BTreeMap<String, usize>,
    /// Share of all valid conversations, in percent
    pub percentages: BTreeMap<String, f64>,
    /// Initiators by count descending, earliest first on ties
    pub podium: Vec<(String, usize)>,
    pub total: usize,
}

/// Ranks initiators over `conversations`.
///
/// Conversations opened by a message without a sender count toward the
/// total but are attributed to nobody.
pub fn rank_initiators(conversations: &[Conversation]) -> InitiatorRanking {
    let counter: FrequencyCounter<String> = conversations
        .iter()
        .filter_map(|c| c.initiator.clone())
        .collect();
    let total = conversations.len();

    let podium = counter.ranked();
    let counts: BTreeMap<String, usize> = podium.iter().cloned().collect();
    let percentages = counts
        .iter()
        .map(|(name, &n)| (name.clone(), n as f64 * 100.0 / total as f64))
        .collect();

    InitiatorRanking {
        counts,
        percentages,
        podium,
        total,
    }
}

/// Running sum of reply latencies for one responder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub total_secs: i64,
    pub samples: usize,
}

impl Latency {
    /// Mean latency in seconds.
    pub fn mean_secs(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total_secs as f64 / self.samples as f64
        }
    }
}

/// Reply latencies keyed by the responder.
///
/// A consecutive pair is a reply when both senders are known and differ and
/// the gap lies strictly inside `(min_secs, max_secs)`.
pub fn response_latencies(
    messages: &[&Message],
    min_secs: i64,
    max_secs: i64,
) -> BTreeMap<String, Latency> {
    let mut latencies: BTreeMap<String, Latency> = BTreeMap::new();

    for pair in messages.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let (Some(asker), Some(responder)) = (prev.sender(), next.sender()) else {
            continue;
        };
        if asker == responder {
            continue;
        }

        let gap = (next.timestamp - prev.timestamp).num_seconds();
        if gap > min_secs && gap < max_secs {
            let entry = latencies.entry(responder.to_string()).or_default();
            entry.total_secs += gap;
            entry.samples += 1;
        }
    }

    latencies
}
