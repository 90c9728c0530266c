//! Frequency map with deterministic ranking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct Slot {
    count: usize,
    first_seen: usize,
}

/// Counts occurrences of keys.
///
/// Rankings order by count descending and break ties by first-seen order,
/// so the same input sequence always produces the same ranking.
///
/// # Example
///
/// ```
/// use chatstats::stats::FrequencyCounter;
///
/// let mut counter = FrequencyCounter::new();
/// counter.extend(["b", "a", "a", "b", "c"]);
///
/// assert_eq!(counter.most_common(2), vec![("b", 2), ("a", 2)]);
/// assert_eq!(counter.get("c"), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    slots: HashMap<K, Slot>,
    total: usize,
}

impl<K> Default for FrequencyCounter<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Adds `n` occurrences of `key`.
    pub fn add_n(&mut self, key: K, n: usize) {
        let next = self.slots.len();
        let slot = self.slots.entry(key).or_insert(Slot {
            count: 0,
            first_seen: next,
        });
        slot.count += n;
        self.total += n;
    }

    /// Returns the count for `key` (zero if unseen).
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).map_or(0, |slot| slot.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The `n` most frequent keys with their counts.
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(&K, Slot)> = self.slots.iter().map(|(k, s)| (k, *s)).collect();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(k, s)| (k.clone(), s.count))
            .collect()
    }

    /// Every key, most frequent first.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        self.most_common(self.slots.len())
    }

    /// The most frequent key, earliest seen on ties.
    pub fn max(&self) -> Option<(K, usize)> {
        self.most_common(1).into_iter().next()
    }

    /// Iterates over keys and counts in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.slots.iter().map(|(k, s)| (k, s.count))
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for FrequencyCounter<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}
