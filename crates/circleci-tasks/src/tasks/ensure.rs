//! Destroy-then-provision composition.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use super::{DESTROY, ENSURE, PROVISION};
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{Task, require};

/// Resource group an [`Ensure`] task converges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Environment variables.
    EnvironmentVariables,
    /// SSH keys.
    SshKeys,
    /// Checkout keys.
    CheckoutKeys,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EnvironmentVariables => "environment variables",
            Self::SshKeys => "SSH keys",
            Self::CheckoutKeys => "checkout keys",
        })
    }
}

/// Invokes the sibling destroy task, then the sibling provision task.
///
/// Sibling names are looked up from the namespace this task is registered
/// in. Positional arguments are forwarded unchanged to both. If destroy
/// fails, provision does not run.
#[derive(Debug, Clone)]
pub struct Ensure {
    name: String,
    resource: Resource,
    project_slug: Option<String>,
    provision_task_name: String,
    destroy_task_name: String,
}

impl Ensure {
    /// Create the task for `resource`, pointing at `provision` and `destroy`.
    #[must_use]
    pub fn new(resource: Resource, project_slug: Option<String>) -> Self {
        Self {
            name: ENSURE.to_string(),
            resource,
            project_slug,
            provision_task_name: PROVISION.to_string(),
            destroy_task_name: DESTROY.to_string(),
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name of the provision task to invoke.
    #[must_use]
    pub fn with_provision_task_name(mut self, name: impl Into<String>) -> Self {
        self.provision_task_name = name.into();
        self
    }

    /// Name of the destroy task to invoke.
    #[must_use]
    pub fn with_destroy_task_name(mut self, name: impl Into<String>) -> Self {
        self.destroy_task_name = name.into();
        self
    }

    /// The provision task this task invokes.
    #[must_use]
    pub fn provision_task_name(&self) -> &str {
        &self.provision_task_name
    }

    /// The destroy task this task invokes.
    #[must_use]
    pub fn destroy_task_name(&self) -> &str {
        &self.destroy_task_name
    }
}

#[async_trait]
impl Task for Ensure {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Ensure {} are configured on the {} project",
            self.resource,
            self.project_slug.as_deref().unwrap_or_default()
        )
    }

    async fn execute(&self, runner: &TaskRunner, scope: &Scope, args: &[String]) -> Result<()> {
        require(&self.name, "project_slug", self.project_slug.as_deref())?;

        debug!(
            destroy = %self.destroy_task_name,
            provision = %self.provision_task_name,
            "Ensuring {}", self.resource
        );
        runner
            .invoke_in_scope(&self.destroy_task_name, scope, args)
            .await?;
        runner
            .invoke_in_scope(&self.provision_task_name, scope, args)
            .await
    }
}
