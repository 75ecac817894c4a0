//! SSH key tasks.

use std::fmt;

use async_trait::async_trait;
use circleci_core::fingerprint::sha1_fingerprint;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DESTROY, PROVISION};
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{ProjectParameters, Task};

/// An SSH key to provision.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeySpec {
    /// Private key material.
    pub private_key: String,

    /// Host to scope the key to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl SshKeySpec {
    /// A key usable against any host.
    #[must_use]
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            hostname: None,
        }
    }

    /// Scope the key to `hostname`.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }
}

impl fmt::Debug for SshKeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshKeySpec")
            .field("private_key", &"<redacted>")
            .field("hostname", &self.hostname)
            .finish()
    }
}

/// Adds every configured SSH key to the project, in order.
#[derive(Debug, Clone)]
pub struct Provision {
    name: String,
    params: ProjectParameters,
    ssh_keys: Vec<SshKeySpec>,
}

impl Provision {
    /// Create the task with no keys.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: PROVISION.to_string(),
            params,
            ssh_keys: Vec::new(),
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the keys to provision.
    #[must_use]
    pub fn with_ssh_keys(mut self, ssh_keys: Vec<SshKeySpec>) -> Self {
        self.ssh_keys = ssh_keys;
        self
    }
}

#[async_trait]
impl Task for Provision {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Provision SSH keys on the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Provisioning all SSH keys to the '{}' project...",
            client.project().project_slug
        );
        for key in &self.ssh_keys {
            let fingerprint = sha1_fingerprint(&key.private_key)?;
            match &key.hostname {
                Some(hostname) => info!(
                    "Adding SSH key with fingerprint: '{}' for hostname: '{}'",
                    fingerprint, hostname
                ),
                None => info!("Adding SSH key with fingerprint: '{}'", fingerprint),
            }
            client
                .create_ssh_key(&key.private_key, key.hostname.as_deref())
                .await?;
        }
        info!("Done.");
        Ok(())
    }
}

/// Removes every SSH key from the project.
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
            "Destroy SSH keys in the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Destroying all SSH keys in the '{}' project...",
            client.project().project_slug
        );
        client.delete_all_ssh_keys().await?;
        info!("Done.");
        Ok(())
    }
}
