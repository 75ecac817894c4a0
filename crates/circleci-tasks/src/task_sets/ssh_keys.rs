//! SSH key task set.

use serde::{Deserialize, Serialize};

use super::TaskNames;
use crate::error::Result;
use crate::group::TaskGroup;
use crate::runner::TaskRunner;
use crate::task::ProjectParameters;
use crate::tasks::ssh_keys::{Destroy, Provision, SshKeySpec};
use crate::tasks::{Ensure, Resource};

/// Provision, destroy and ensure tasks for SSH keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeys {
    /// Namespace to define the tasks in; top level when unset.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Project coordinates.
    #[serde(flatten)]
    pub params: ProjectParameters,

    /// Keys to provision.
    #[serde(default)]
    pub ssh_keys: Vec<SshKeySpec>,

    /// Task names.
    #[serde(flatten)]
    pub names: TaskNames,
}

impl SshKeys {
    /// A task set for `project_slug` with default names and no keys.
    #[must_use]
    pub fn new(project_slug: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            params: ProjectParameters::new(project_slug, api_token),
            ..Self::default()
        }
    }

    /// Define the tasks in `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a key to provision.
    #[must_use]
    pub fn with_ssh_key(mut self, ssh_key: SshKeySpec) -> Self {
        self.ssh_keys.push(ssh_key);
        self
    }

    /// Adjust any field before definition.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// The tasks this set defines.
    #[must_use]
    pub fn task_group(&self) -> TaskGroup {
        group(
            self.namespace.as_deref(),
            &self.params,
            &self.ssh_keys,
            &self.names,
        )
    }

    /// Register the tasks on `runner`.
    ///
    /// # Errors
    ///
    /// Returns an error if a task name is already taken.
    pub fn define_on(&self, runner: &mut TaskRunner) -> Result<()> {
        runner.define(&self.task_group())
    }
}

pub(super) fn group(
    namespace: Option<&str>,
    params: &ProjectParameters,
    ssh_keys: &[SshKeySpec],
    names: &TaskNames,
) -> TaskGroup {
    TaskGroup::new(namespace)
        .with_task(
            Provision::new(params.clone())
                .with_name(&names.provision_task_name)
                .with_ssh_keys(ssh_keys.to_vec()),
        )
        .with_task(Destroy::new(params.clone()).with_name(&names.destroy_task_name))
        .with_task(
            Ensure::new(Resource::SshKeys, params.project_slug.clone())
                .with_name(&names.ensure_task_name)
                .with_provision_task_name(&names.provision_task_name)
                .with_destroy_task_name(&names.destroy_task_name),
        )
}
