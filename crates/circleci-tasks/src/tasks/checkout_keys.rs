//! Checkout key tasks.

use async_trait::async_trait;
use circleci_core::CheckoutKeyType;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DESTROY, PROVISION};
use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::{ProjectParameters, Task};

/// A checkout key to have the provider generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutKeySpec {
    /// Kind of key.
    #[serde(rename = "type")]
    pub key_type: CheckoutKeyType,
}

impl CheckoutKeySpec {
    /// A key of kind `key_type`.
    #[must_use]
    pub fn new(key_type: impl Into<CheckoutKeyType>) -> Self {
        Self {
            key_type: key_type.into(),
        }
    }
}

/// Creates every configured checkout key, in order.
#[derive(Debug, Clone)]
pub struct Provision {
    name: String,
    params: ProjectParameters,
    checkout_keys: Vec<CheckoutKeySpec>,
}

impl Provision {
    /// Create the task with no keys.
    #[must_use]
    pub fn new(params: ProjectParameters) -> Self {
        Self {
            name: PROVISION.to_string(),
            params,
            checkout_keys: Vec::new(),
        }
    }

    /// Rename the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the keys to create.
    #[must_use]
    pub fn with_checkout_keys(mut self, checkout_keys: Vec<CheckoutKeySpec>) -> Self {
        self.checkout_keys = checkout_keys;
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
            "Provision checkout keys on the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Provisioning all checkout keys to the '{}' project...",
            client.project().project_slug
        );
        for key in &self.checkout_keys {
            info!("Adding checkout key of type: '{}'", key.key_type);
            client.create_checkout_key(&key.key_type).await?;
        }
        info!("Done.");
        Ok(())
    }
}

/// Deletes every checkout key on the project.
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
            "Destroy checkout keys in the {} project",
            self.params.display_slug()
        )
    }

    async fn execute(&self, runner: &TaskRunner, _scope: &Scope, _args: &[String]) -> Result<()> {
        let project = self.params.project_reference(&self.name)?;
        let client = runner.client(project);

        info!(
            "Destroying all checkout keys in the '{}' project...",
            client.project().project_slug
        );
        client.delete_all_checkout_keys().await?;
        info!("Done.");
        Ok(())
    }
}
