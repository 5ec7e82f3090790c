use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no habit with id `{0}`")]
    UnknownHabit(String),
    #[error("habit name must not be empty")]
    EmptyName,
    #[error("habit store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("habit store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
