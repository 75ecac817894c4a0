//! Error types for circleci-tasks.

use thiserror::Error;

use crate::config::ConfigLoadError;

/// Result type alias for circleci-tasks.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the project file.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// Error defining or running a task.
    #[error(transparent)]
    Task(#[from] circleci_tasks::TaskError),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Task(error) if error.is_configuration_error() => 2,
            Self::Task(_) => 1,
        }
    }
}
