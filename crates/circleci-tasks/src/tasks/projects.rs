//! Project tasks.

use async_trait::async_trait;
use tracing::info;

use super::FOLLOW;
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{ProjectParameters, Task};

/// Follows the project.
#[derive(Debug, Clone)]
pub struct Follow {
    name: String,
    params: ProjectParameters,
}

impl Follow {
    /// Create the task.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: FOLLOW.to_string(),
            params,
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Task for Follow {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Follow the {} project", self.params.display_slug())
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!("Following the '{}' project...", client.project().project_slug);
        client.follow_project().await?;
        info!("Done.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use circleci_core::HttpMethod;
    use circleci_core::testing::StubTransport;

    #[tokio::test]
    async fn test_follow_posts_to_follow_url() {
        let transport = Arc::new(StubTransport::new());
        let runner = TaskRunner::with_transport(transport.clone());

        Follow::new(ProjectParameters::new("github/org/repo", "some-token"))
            .execute(&runner, &Scope::root(), &[])
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec![(
                HttpMethod::Post,
                "https://circleci.com/api/v1.1/project/github/org/repo/follow?circle-token=some-token"
                    .to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_follow_failure_propagates() {
        let transport = Arc::new(StubTransport::new());
        transport.stub(
            HttpMethod::Post,
            "https://circleci.com/api/v1.1/project/github/org/repo/follow?circle-token=t",
            500,
            "",
        );
        let runner = TaskRunner::with_transport(transport.clone());

        let error = Follow::new(ProjectParameters::new("github/org/repo", "t"))
            .execute(&runner, &Scope::root(), &[])
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Unsuccessful request: https://circleci.com/api/v1.1/project/github/org/repo/follow 500 Internal Server Error"
        );
    }

    #[test]
    fn test_description() {
        let task = Follow::new(ProjectParameters::new("github/org/repo", "t"));
        assert_eq!(task.description(), "Follow the github/org/repo project");
    }
}
