use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::HabitError;

/// Granularity a habit is tracked at. Fixed when the habit is created.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Unit noun for `count` periods, e.g. "day" / "days".
    pub fn unit_label(&self, count: u32) -> &'static str {
        let plural = count != 1;
        match (self, plural) {
            (Self::Daily, false) => "day",
            (Self::Daily, true) => "days",
            (Self::Weekly, false) => "week",
            (Self::Weekly, true) => "weeks",
            (Self::Monthly, false) => "month",
            (Self::Monthly, true) => "months",
            (Self::Yearly, false) => "year",
            (Self::Yearly, true) => "years",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Period::ALL
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| HabitError::UnknownPeriod(normalized.to_string()))
    }
}

/// A tracked habit as stored by the application.
///
/// `completion_dates` is semantically a set of local calendar days. The engine
/// only ever reads it; duplicates are tolerated and ordering is irrelevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub period: Period,
    #[serde(default)]
    pub completion_dates: Vec<NaiveDate>,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: NaiveDate,
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        period: Period,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            period,
            completion_dates: Vec::new(),
            created_at,
        }
    }

    pub fn with_completions(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.completion_dates.extend(dates);
        self
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completion_dates.contains(&day)
    }
}

/// Parse a `YYYY-MM-DD` calendar day.
pub fn parse_day(raw: &str) -> Result<NaiveDate, HabitError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| HabitError::InvalidDay(raw.to_string()))
}

// Older records store the creation instant as a full RFC 3339 timestamp.
fn parse_created_at(raw: &str) -> Result<NaiveDate, HabitError> {
    if let Ok(day) = parse_day(raw) {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| HabitError::InvalidDay(raw.to_string()))
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(serde::de::Error::custom)
}
