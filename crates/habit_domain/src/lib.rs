pub mod error;
pub mod service;
pub mod store;

pub use crate::error::DomainError;
pub use crate::service::{streak_label, DailyProgress, HabitReport, HabitService, HabitServiceBuilder};
pub use crate::store::{HabitStore, LoadOutcome};
