use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    /// The owning user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The task does not exist, or belongs to a different user — callers
    /// cannot distinguish the two.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for TaskError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => TaskError::UserNotFound(id),
            UserError::DatabaseError(msg) => TaskError::DatabaseError(msg),
            other => TaskError::Unknown(other.to_string()),
        }
    }
}
