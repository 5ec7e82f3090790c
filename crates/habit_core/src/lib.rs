pub mod aggregate;
pub mod error;
pub mod habit;
pub mod period;
pub mod streak;

pub use crate::aggregate::{
    completions_this_month, completions_this_week, days_since_last_completion,
    last_completion_date, total_completions, HabitStats,
};
pub use crate::error::HabitError;
pub use crate::habit::{parse_day, Habit, Period};
pub use crate::period::{
    bucket_key, bucket_key_string, is_consecutive, previous_bucket_anchor, BucketKey, OrderedPair,
};
pub use crate::streak::{best_streak, current_streak, streak_summary, StreakSummary};
