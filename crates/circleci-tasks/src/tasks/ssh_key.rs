//! Single SSH key task.

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use super::PROVISION;
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{ProjectParameters, Task, require};

/// Adds one SSH key to the project.
///
/// Unlike [`ssh_keys::Provision`](super::ssh_keys::Provision) the key is a
/// required parameter of its own.
#[derive(Clone)]
pub struct Provision {
    name: String,
    params: ProjectParameters,
    private_key: Option<String>,
    hostname: Option<String>,
}

impl Provision {
    /// Create the task with no key set.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: PROVISION.to_string(),
            params,
            private_key: None,
            hostname: None,
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the private key.
    #[must_use]
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Scope the key to `hostname`.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }
}

impl fmt::Debug for Provision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provision")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("hostname", &self.hostname)
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
            "Provision SSH key on the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let private_key = require(&self.name, "private_key", self.private_key.as_deref())?;
        let client = runner.client(project);

        info!(
            "Provisioning SSH key to the '{}' project...",
            client.project().project_slug
        );
        client
            .create_ssh_key(private_key, self.hostname.as_deref())
            .await?;
        info!("Done.");
        Ok(())
    }
}
