//! Longest run of active days.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// A run of active dates with no silence longer than the tolerated gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Streak {
    /// Calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Finds the longest streak in a set of active dates.
///
/// Consecutive active dates belong to the same streak when at most
/// `max_gap_days` silent days separate them. With the default of one, days
/// 1, 2 and 4 form a single four-day streak. The earliest streak wins ties.
pub fn longest_streak(dates: &BTreeSet<NaiveDate>, max_gap_days: i64) -> Option<Streak> {
    let mut iter = dates.iter().copied();
    let first = iter.next()?;

    let mut best = Streak {
        start: first,
        end: first,
    };
    let mut current = best;

    for date in iter {
        if (date - current.end).num_days() <= max_gap_days + 1 {
            current.end = date;
        } else {
            current = Streak {
                start: date,
                end: date,
            };
        }
        if current.days() > best.days() {
            best = current;
        }
    }

    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(list: &[u32]) -> BTreeSet<NaiveDate> {
        list.iter()
            .map(|d| NaiveDate::from_ymd_opt(2023, 3, *d).unwrap())
            .collect()
    }

    #[test]
    fn test_one_silent_day_is_tolerated() {
        let streak = longest_streak(&days(&[1, 2, 4]), 1).unwrap();
        assert_eq!(streak.days(), 4);
        assert_eq!(streak.start.to_string(), "2023-03-01");
        assert_eq!(streak.end.to_string(), "2023-03-04");
    }

    #[test]
    fn test_two_silent_days_break() {
        let streak = longest_streak(&days(&[1, 2, 5, 6, 7]), 1).unwrap();
        assert_eq!(streak.days(), 3);
        assert_eq!(streak.start.to_string(), "2023-03-05");
    }

    #[test]
    fn test_strict_consecutive() {
        let streak = longest_streak(&days(&[1, 2, 4]), 0).unwrap();
        assert_eq!(streak.days(), 2);
    }

    #[test]
    fn test_earliest_wins_ties() {
        let streak = longest_streak(&days(&[1, 2, 10, 11]), 1).unwrap();
        assert_eq!(streak.start.to_string(), "2023-03-01");
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(longest_streak(&days(&[9]), 1).unwrap().days(), 1);
        assert!(longest_streak(&BTreeSet::new(), 1).is_none());
    }
}
