use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use habit_core::{Habit, HabitStats, Period};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::DomainError;
use crate::store::{HabitStore, LoadOutcome};

/// How many habits are done on a given day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyProgress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; 0 with no habits.
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HabitReport {
    pub habit: Habit,
    pub stats: HabitStats,
}

/// Owns the habit list. All mutation goes through here so that readers
/// always see a whole, consistent snapshot.
pub struct HabitService {
    habits: RwLock<Vec<Habit>>,
    store: Option<HabitStore>,
}

pub struct HabitServiceBuilder {
    habits: Vec<Habit>,
    store: Option<HabitStore>,
}

impl HabitServiceBuilder {
    pub fn new() -> Self {
        Self {
            habits: Vec::new(),
            store: None,
        }
    }

    pub fn with_store(mut self, path: impl AsRef<Path>) -> Self {
        self.store = Some(HabitStore::new(path));
        self
    }

    /// Seed the list. Ignored when a store is attached, since `build` loads it.
    pub fn with_habits(mut self, habits: Vec<Habit>) -> Self {
        self.habits = habits;
        self
    }

    pub fn build(self) -> Result<HabitService> {
        let service = HabitService {
            habits: RwLock::new(self.habits),
            store: self.store,
        };
        if service.store.is_some() {
            service.reload()?;
        }
        Ok(service)
    }
}

impl Default for HabitServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitService {
    pub fn builder() -> HabitServiceBuilder {
        HabitServiceBuilder::new()
    }

    /// Replace the in-memory list with the store's contents.
    pub fn reload(&self) -> Result<LoadOutcome> {
        let Some(store) = &self.store else {
            return Ok(LoadOutcome::Missing);
        };
        let outcome = store.load()?;
        *self.habits.write() = outcome.clone().into_habits();
        Ok(outcome)
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.habits.read().clone()
    }

    pub fn get(&self, id: &str) -> Result<Habit> {
        self.habits
            .read()
            .iter()
            .find(|habit| habit.id == id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownHabit(id.to_string()).into())
    }

    #[instrument(skip(self))]
    pub fn add_habit(&self, name: &str, period: Period, today: NaiveDate) -> Result<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName.into());
        }
        let habit = Habit::new(Uuid::new_v4().to_string(), name, period, today);
        self.mutate(|habits| {
            habits.push(habit.clone());
            Ok(())
        })?;
        tracing::info!(id = %habit.id, %period, "added habit");
        Ok(habit)
    }

    /// Mark `today` done, or undo it if already marked. Returns the new state.
    #[instrument(skip(self))]
    pub fn toggle_completion(&self, id: &str, today: NaiveDate) -> Result<bool> {
        let completed = self.mutate(|habits| {
            let habit = find_mut(habits, id)?;
            if habit.is_completed_on(today) {
                habit.completion_dates.retain(|date| *date != today);
                Ok(false)
            } else {
                habit.completion_dates.push(today);
                Ok(true)
            }
        })?;
        tracing::debug!(id, completed, "toggled completion");
        Ok(completed)
    }

    #[instrument(skip(self))]
    pub fn rename_habit(&self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName.into());
        }
        self.mutate(|habits| {
            find_mut(habits, id)?.name = name.to_string();
            Ok(())
        })
    }

    #[instrument(skip(self))]
    pub fn delete_habit(&self, id: &str) -> Result<()> {
        self.mutate(|habits| {
            let before = habits.len();
            habits.retain(|habit| habit.id != id);
            if habits.len() == before {
                return Err(DomainError::UnknownHabit(id.to_string()).into());
            }
            Ok(())
        })?;
        tracing::info!(id, "deleted habit");
        Ok(())
    }

    pub fn is_completed_on(&self, id: &str, day: NaiveDate) -> Result<bool> {
        Ok(self.get(id)?.is_completed_on(day))
    }

    pub fn daily_progress(&self, today: NaiveDate) -> DailyProgress {
        let habits = self.habits.read();
        let total = habits.len();
        let completed = habits
            .iter()
            .filter(|habit| habit.is_completed_on(today))
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((completed * 100 + total / 2) / total) as u8
        };
        DailyProgress {
            completed,
            total,
            percent,
        }
    }

    pub fn stats(&self, today: NaiveDate) -> Vec<HabitReport> {
        self.habits()
            .into_iter()
            .map(|habit| {
                let stats = HabitStats::compute(&habit, today);
                HabitReport { habit, stats }
            })
            .collect()
    }

    pub fn stats_for(&self, id: &str, today: NaiveDate) -> Result<HabitStats> {
        Ok(HabitStats::compute(&self.get(id)?, today))
    }
}

impl HabitService {
    // Apply `change` to a copy and publish it only once the store has
    // accepted it; the write lock is held throughout so saves stay ordered.
    fn mutate<T>(&self, change: impl FnOnce(&mut Vec<Habit>) -> Result<T>) -> Result<T> {
        let mut habits = self.habits.write();
        let mut staged = habits.clone();
        let value = change(&mut staged)?;
        if let Some(store) = &self.store {
            store.save(&staged)?;
        }
        *habits = staged;
        Ok(value)
    }
}

fn find_mut<'a>(habits: &'a mut [Habit], id: &str) -> Result<&'a mut Habit> {
    habits
        .iter_mut()
        .find(|habit| habit.id == id)
        .ok_or_else(|| DomainError::UnknownHabit(id.to_string()).into())
}

/// Short badge text such as "3 day streak" or "2 week streak".
pub fn streak_label(period: Period, count: u32) -> String {
    format!("{count} {} streak", period.unit_label(1))
}
