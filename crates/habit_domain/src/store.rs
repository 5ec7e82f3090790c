use std::fs;
use std::path::{Path, PathBuf};

use habit_core::Habit;
use serde_json::Value;

use crate::error::DomainError;

/// What [`HabitStore::load`] found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<Habit>),
    /// No file yet; treated as an empty list.
    Missing,
    /// The file held the old name-only schema and was reset to an empty list.
    LegacyWiped,
}

impl LoadOutcome {
    pub fn into_habits(self) -> Vec<Habit> {
        match self {
            Self::Loaded(habits) => habits,
            Self::Missing | Self::LegacyWiped => Vec::new(),
        }
    }
}

/// JSON file holding the full habit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LoadOutcome, DomainError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "habit store missing");
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(LoadOutcome::Loaded(Vec::new()));
        }

        let value: Value = serde_json::from_str(&raw)?;
        if is_legacy_schema(&value) {
            tracing::warn!(
                path = %self.path.display(),
                "habit store uses the legacy name-only schema; resetting"
            );
            self.save(&[])?;
            return Ok(LoadOutcome::LegacyWiped);
        }

        let habits: Vec<Habit> = serde_json::from_value(value)?;
        tracing::debug!(path = %self.path.display(), count = habits.len(), "loaded habits");
        Ok(LoadOutcome::Loaded(habits))
    }

    pub fn save(&self, habits: &[Habit]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(habits)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

// The first release stored habits as a bare array of names.
fn is_legacy_schema(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(Value::is_string)
}
