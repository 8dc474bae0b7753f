//! Error types for domain validation.

use thiserror::Error;

/// Errors returned while validating domain values at the repository boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The to-do name is empty after trimming.
    #[error("to-do name must not be empty")]
    EmptyTodoName,

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The priority label is not one of the supported values.
    #[error("unknown priority '{0}', expected low, medium, or high")]
    UnknownPriority(String),
}
