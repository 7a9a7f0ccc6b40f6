//! Error types returned by the task store

use crate::task::TaskId;

/// A failure reported by a [`KeyValueStore`](crate::traits::KeyValueStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage medium could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value does not fit in the space the medium has left
    #[error("quota exceeded for {key:?}: {size} bytes (limit is {limit} bytes)")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    /// The medium refused the operation for another reason
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Invalid user input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("task title is required")]
    EmptyTitle,

    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid time {0:?} (expected HH:mm)")]
    InvalidTime(String),

    #[error("a task with id {0} already exists")]
    DuplicateId(TaskId),
}

/// Every error a [`TaskRepository`](crate::repository::TaskRepository) can report.
///
/// The repository never retries nor recovers by itself: callers decide what to do with these.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// The stored payload does not match the expected structure.
    /// This must be repaired before the collection can be used again
    #[error("task collection stored under {key:?} is corrupted: {reason}")]
    Corruption { key: String, reason: String },
}

impl TaskError {
    /// Whether running the same operation again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            TaskError::Persistence(_) => true,
            TaskError::Validation(_) | TaskError::Corruption { .. } => false,
        }
    }
}

/// Convenience result type
pub type TaskResult<T> = Result<T, TaskError>;
