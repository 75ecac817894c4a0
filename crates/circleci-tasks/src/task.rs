//! The task abstraction and parameters shared by every task.

use std::fmt;

use async_trait::async_trait;
use circleci_core::ProjectReference;
use circleci_core::project::default_base_url;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};
use crate::runner::{Scope, TaskRunner};

/// A named unit of work that can be registered on a [`TaskRunner`].
#[async_trait]
pub trait Task: Send + Sync + fmt::Debug {
    /// Name of the task, relative to the namespace it is registered in.
    fn name(&self) -> &str;

    /// One-line human-readable description.
    fn description(&self) -> String;

    /// Run the task.
    ///
    /// `scope` is the namespace the task was registered under and `args` are
    /// the positional arguments it was invoked with.
    async fn execute(&self, runner: &TaskRunner, scope: &Scope, args: &[String]) -> Result<()>;
}

/// Project coordinates carried by every task that talks to the API.
///
/// `project_slug` and `api_token` have no defaults; they are checked when
/// the task runs, before any request is made.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParameters {
    /// Project slug, e.g. `github/org/repo`.
    #[serde(default)]
    pub project_slug: Option<String>,

    /// API token.
    #[serde(default)]
    pub api_token: Option<String>,

    /// API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ProjectParameters {
    /// Parameters for `project_slug` with the given token and the default
    /// base URL.
    #[must_use]
    pub fn new(project_slug: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            project_slug: Some(project_slug.into()),
            api_token: Some(api_token.into()),
            base_url: default_base_url(),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Slug used in descriptions; empty while unset.
    #[must_use]
    pub fn display_slug(&self) -> &str {
        self.project_slug.as_deref().unwrap_or_default()
    }

    /// The project slug, or a configuration error naming `task`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingParameter`] if the slug is unset.
    pub fn require_slug(&self, task: &str) -> Result<&str> {
        require(task, "project_slug", self.project_slug.as_deref())
    }

    /// A fully populated project reference, or a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingParameter`] if the slug or token is unset.
    pub fn project_reference(&self, task: &str) -> Result<ProjectReference> {
        let project_slug = self.require_slug(task)?;
        let api_token = require(task, "api_token", self.api_token.as_deref())?;
        Ok(ProjectReference::new(
            self.base_url.as_str(),
            api_token,
            project_slug,
        ))
    }
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self {
            project_slug: None,
            api_token: None,
            base_url: default_base_url(),
        }
    }
}

impl fmt::Debug for ProjectParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectParameters")
            .field("project_slug", &self.project_slug)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Returns `value`, or a [`TaskError::MissingParameter`] if it is unset.
///
/// # Errors
///
/// Returns an error if `value` is `None`.
pub fn require<'a>(task: &str, parameter: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| TaskError::MissingParameter {
        task: task.to_string(),
        parameter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_reference() {
        let params = ProjectParameters::new("github/org/repo", "token");
        let project = params.project_reference("provision").unwrap();
        assert_eq!(project.base_url, "https://circleci.com/api");
        assert_eq!(project.api_token, "token");
        assert_eq!(project.project_slug, "github/org/repo");
    }

    #[test]
    fn test_missing_slug_is_configuration_error() {
        let params = ProjectParameters {
            api_token: Some("token".to_string()),
            ..ProjectParameters::default()
        };
        let error = params.project_reference("provision").unwrap_err();
        assert!(error.is_configuration_error());
        assert_eq!(
            error.to_string(),
            "Required parameter 'project_slug' unset for task 'provision'"
        );
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let params = ProjectParameters {
            project_slug: Some("github/org/repo".to_string()),
            ..ProjectParameters::default()
        };
        let error = params.project_reference("destroy").unwrap_err();
        assert!(matches!(
            error,
            TaskError::MissingParameter {
                parameter: "api_token",
                ..
            }
        ));
    }

    #[test]
    fn test_deserialize_defaults_base_url() {
        let params: ProjectParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(params.base_url, "https://circleci.com/api");
        assert!(params.project_slug.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let params = ProjectParameters::new("github/org/repo", "secret-token");
        assert!(!format!("{params:?}").contains("secret-token"));
    }
}
