//! Error types for the CircleCI client.

use thiserror::Error;

/// Result type alias for the CircleCI client.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The provider answered with a status outside `[200, 300)`.
    #[error("Unsuccessful request: {host}{path} {status}{}", reason_suffix(.reason))]
    UnsuccessfulRequest {
        /// Origin of the failed response, e.g. `https://circleci.com`.
        host: String,
        /// Path of the failed response, without the query string.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        reason: String,
    },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// SSH private key material could not be parsed.
    #[error("Invalid SSH private key: {0}")]
    InvalidKey(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}

impl CoreError {
    /// Returns the HTTP status for request failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}
