//! Single SSH key task set.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::default_provision_task_name;
use crate::error::Result;
use crate::group::TaskGroup;
use crate::runner::TaskRunner;
use crate::task::ProjectParameters;
use crate::tasks::ssh_key::Provision;

/// A single provision task for one SSH key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Namespace to define the task in; top level when unset.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Project coordinates.
    #[serde(flatten)]
    pub params: ProjectParameters,

    /// The key; required when the task runs.
    #[serde(default)]
    pub private_key: Option<String>,

    /// Host the key is scoped to.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Name of the provision task.
    #[serde(default = "default_provision_task_name")]
    pub provision_task_name: String,
}

impl Default for SshKey {
    fn default() -> Self {
        Self {
            namespace: None,
            params: ProjectParameters::default(),
            private_key: None,
            hostname: None,
            provision_task_name: default_provision_task_name(),
        }
    }
}

impl fmt::Debug for SshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshKey")
            .field("namespace", &self.namespace)
            .field("params", &self.params)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("hostname", &self.hostname)
            .field("provision_task_name", &self.provision_task_name)
            .finish()
    }
}

impl SshKey {
    /// A task set for `project_slug` with no key yet.
    #[must_use]
    pub fn new(project_slug: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            params: ProjectParameters::new(project_slug, api_token),
            ..Self::default()
        }
    }

    /// Define the task in `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the key.
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

    /// Adjust any field before definition.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// The task this set defines.
    #[must_use]
    pub fn task_group(&self) -> TaskGroup {
        let mut provision =
            Provision::new(self.params.clone()).with_name(&self.provision_task_name);
        if let Some(private_key) = &self.private_key {
            provision = provision.with_private_key(private_key);
        }
        if let Some(hostname) = &self.hostname {
            provision = provision.with_hostname(hostname);
        }
        TaskGroup::new(self.namespace.as_deref()).with_task(provision)
    }

    /// Register the task on `runner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task name is already taken.
    pub fn define_on(&self, runner: &mut TaskRunner) -> Result<()> {
        runner.define(&self.task_group())
    }
}
