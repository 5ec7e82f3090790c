use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::period::{bucket_key, is_consecutive, previous_bucket_anchor, BucketKey, OrderedPair};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
}

/// Number of consecutive buckets, ending with the one containing `today`,
/// that each hold at least one completion. Zero when `today`'s bucket is empty.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    if habit.completion_dates.is_empty() {
        return 0;
    }

    let buckets: BTreeSet<BucketKey> = habit
        .completion_dates
        .iter()
        .map(|date| bucket_key(*date, habit.period))
        .collect();

    let mut streak = 0;
    let mut anchor = today;
    while buckets.contains(&bucket_key(anchor, habit.period)) {
        streak += 1;
        let previous = previous_bucket_anchor(anchor, habit.period);
        if previous >= anchor {
            break;
        }
        anchor = previous;
    }
    streak
}

/// Longest run of adjacent buckets anywhere in the habit's history.
pub fn best_streak(habit: &Habit) -> u32 {
    let mut dates = habit.completion_dates.clone();
    dates.sort_unstable();
    // Several completions in one bucket count once.
    dates.dedup_by_key(|date| bucket_key(*date, habit.period));

    let Some((first, rest)) = dates.split_first() else {
        return 0;
    };

    let mut best = 1;
    let mut run = 1;
    let mut previous = *first;
    for &date in rest {
        if is_consecutive(OrderedPair::new(previous, date), habit.period) {
            run += 1;
        } else {
            best = best.max(run);
            run = 1;
        }
        previous = date;
    }
    best.max(run)
}

pub fn streak_summary(habit: &Habit, today: NaiveDate) -> StreakSummary {
    StreakSummary {
        current: current_streak(habit, today),
        best: best_streak(habit),
    }
}
