//! Error types for CircleCI tasks.

use thiserror::Error;

/// Result type alias for CircleCI tasks.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Task error types.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required parameter was not set when the task was invoked.
    #[error("Required parameter '{parameter}' unset for task '{task}'")]
    MissingParameter {
        /// Name of the task being invoked.
        task: String,
        /// The unset parameter.
        parameter: &'static str,
    },

    /// No task with this name is visible from the invoking scope.
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    /// A task with this fully-qualified name is already registered.
    #[error("Task '{0}' is already defined")]
    DuplicateTask(String),

    /// Error from the CircleCI client.
    #[error(transparent)]
    Client(#[from] circleci_core::CoreError),
}

impl TaskError {
    /// Whether this is a configuration error rather than a runtime failure.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingParameter { .. })
    }
}
