//! Calendar-period bucketing.
//!
//! Every higher-level statistic decides "same period" by comparing
//! [`BucketKey`]s, never by measuring the distance between raw dates.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::Period;

/// Canonical identity of the day, week, month or year containing a date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Day(NaiveDate),
    /// Keyed by the Sunday that opens the week.
    Week(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) | Self::Week(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Year(year) => write!(f, "{year:04}"),
        }
    }
}

/// Two dates in ascending order. Construction sorts its arguments, so code
/// holding an `OrderedPair` never has to check `earlier <= later` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedPair {
    earlier: NaiveDate,
    later: NaiveDate,
}

impl OrderedPair {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { earlier: a, later: b }
        } else {
            Self { earlier: b, later: a }
        }
    }

    pub fn earlier(&self) -> NaiveDate {
        self.earlier
    }

    pub fn later(&self) -> NaiveDate {
        self.later
    }
}

pub fn bucket_key(date: NaiveDate, period: Period) -> BucketKey {
    match period {
        Period::Daily => BucketKey::Day(date),
        Period::Weekly => BucketKey::Week(week_start(date)),
        Period::Monthly => BucketKey::Month {
            year: date.year(),
            month: date.month(),
        },
        Period::Yearly => BucketKey::Year(date.year()),
    }
}

/// String form of [`bucket_key`]: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn bucket_key_string(date: NaiveDate, period: Period) -> String {
    bucket_key(date, period).to_string()
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whether the later date's bucket immediately follows the earlier one's.
pub fn is_consecutive(pair: OrderedPair, period: Period) -> bool {
    let (earlier, later) = (pair.earlier(), pair.later());
    match period {
        Period::Daily => (later - earlier).num_days() == 1,
        Period::Weekly => (week_start(later) - week_start(earlier)).num_days() == 7,
        Period::Monthly => {
            let years = i64::from(later.year()) - i64::from(earlier.year());
            let months = i64::from(later.month()) - i64::from(earlier.month());
            years * 12 + months == 1
        }
        Period::Yearly => later.year() - earlier.year() == 1,
    }
}

/// A date inside the bucket just before the one containing `date`.
///
/// Month and year steps clamp the day to the target month's length, so
/// Mar 31 steps to the last day of February.
pub fn previous_bucket_anchor(date: NaiveDate, period: Period) -> NaiveDate {
    let previous = match period {
        Period::Daily => date.checked_sub_days(Days::new(1)),
        Period::Weekly => date.checked_sub_days(Days::new(7)),
        Period::Monthly => date.checked_sub_months(Months::new(1)),
        Period::Yearly => date.checked_sub_months(Months::new(12)),
    };
    previous.unwrap_or(NaiveDate::MIN)
}
