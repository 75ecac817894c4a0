//! Environment variable tasks.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use tracing::info;

use super::{DESTROY, PROVISION};
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{ProjectParameters, Task};

/// Sets every configured environment variable on the project.
#[derive(Clone)]
pub struct Provision {
    name: String,
    params: ProjectParameters,
    environment_variables: BTreeMap<String, String>,
}

impl Provision {
    /// Create the task with no variables.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: PROVISION.to_string(),
            params,
            environment_variables: BTreeMap::new(),
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the name to value mapping to provision.
    #[must_use]
    pub fn with_environment_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.environment_variables = variables;
        self
    }
}

impl fmt::Debug for Provision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provision")
            .field("name", &self.name)
            .field("params", &self.params)
            .field(
                "environment_variables",
                &self.environment_variables.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl Task for Provision {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Provision environment variables on the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Provisioning all environment variables to the '{}' project...",
            client.project().project_slug
        );
        for (name, value) in &self.environment_variables {
            info!("Setting environment variable: '{}'", name);
            client.create_env_var(name, value).await?;
        }
        info!("Done.");
        Ok(())
    }
}

/// Deletes every environment variable on the project.
#[derive(Debug, Clone)]
pub struct Destroy {
    name: String,
    params: ProjectParameters,
}

impl Destroy {
    /// Create the task.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: DESTROY.to_string(),
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
impl Task for Destroy {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Destroy environment variables on the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Destroying all environment variables on the '{}' project...",
            client.project().project_slug
        );
        client.delete_all_env_vars().await?;
        info!("Done.");
        Ok(())
    }
}
