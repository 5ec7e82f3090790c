use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::period::{month_start, week_start};
use crate::streak::{best_streak, current_streak};

/// Every derived figure a stats view shows for one habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_completions: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub last_completion: Option<NaiveDate>,
    pub days_since_last_completion: Option<i64>,
}

impl HabitStats {
    pub fn compute(habit: &Habit, today: NaiveDate) -> Self {
        Self {
            current_streak: current_streak(habit, today),
            best_streak: best_streak(habit),
            total_completions: total_completions(habit),
            this_week: completions_this_week(habit, today),
            this_month: completions_this_month(habit, today),
            last_completion: last_completion_date(habit),
            days_since_last_completion: days_since_last_completion(habit, today),
        }
    }
}

/// Number of recorded completions, duplicates included.
pub fn total_completions(habit: &Habit) -> usize {
    habit.completion_dates.len()
}

/// Completions on or after the Sunday opening `today`'s week.
pub fn completions_this_week(habit: &Habit, today: NaiveDate) -> usize {
    count_on_or_after(habit, week_start(today))
}

/// Completions on or after the first day of `today`'s month.
pub fn completions_this_month(habit: &Habit, today: NaiveDate) -> usize {
    count_on_or_after(habit, month_start(today))
}

pub fn last_completion_date(habit: &Habit) -> Option<NaiveDate> {
    habit.completion_dates.iter().max().copied()
}

/// Whole days from the latest completion to `today`; `None` without completions.
pub fn days_since_last_completion(habit: &Habit, today: NaiveDate) -> Option<i64> {
    last_completion_date(habit).map(|last| (today - last).num_days())
}

fn count_on_or_after(habit: &Habit, start: NaiveDate) -> usize {
    habit
        .completion_dates
        .iter()
        .filter(|date| **date >= start)
        .count()
}
