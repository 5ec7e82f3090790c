use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HabitError {
    #[error("unknown habit period `{0}`")]
    UnknownPeriod(String),
    #[error("invalid calendar day `{0}`, expected YYYY-MM-DD")]
    InvalidDay(String),
}
