//! Project task set: every resource group plus follow.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    TaskNames, checkout_keys, default_destroy_task_name, default_ensure_task_name,
    default_follow_task_name, default_provision_task_name, environment_variables, ssh_keys,
};
use crate::error::Result;
use crate::group::TaskGroup;
use crate::runner::TaskRunner;
use crate::task::ProjectParameters;
use crate::tasks::Follow;
use crate::tasks::checkout_keys::CheckoutKeySpec;
use crate::tasks::ssh_keys::SshKeySpec;

fn default_env_vars_namespace() -> String {
    "env_vars".to_string()
}

fn default_ssh_keys_namespace() -> String {
    "ssh_keys".to_string()
}

fn default_checkout_keys_namespace() -> String {
    "checkout_keys".to_string()
}

fn default_project_namespace() -> String {
    "project".to_string()
}

/// Every task for one project, one sub-namespace per resource group.
///
/// With the defaults and a `circle_ci` namespace this defines:
///
/// ```text
/// circle_ci:env_vars:{provision,destroy,ensure}
/// circle_ci:ssh_keys:{provision,destroy,ensure}
/// circle_ci:checkout_keys:{provision,destroy,ensure}
/// circle_ci:project:follow
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Namespace to define everything in; top level when unset.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Project coordinates shared by every task.
    #[serde(flatten)]
    pub params: ProjectParameters,

    /// Environment variables to provision.
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,
    /// SSH keys to provision.
    #[serde(default)]
    pub ssh_keys: Vec<SshKeySpec>,
    /// Checkout keys to have generated.
    #[serde(default)]
    pub checkout_keys: Vec<CheckoutKeySpec>,

    /// Sub-namespace of the environment variable tasks.
    #[serde(default = "default_env_vars_namespace")]
    pub env_vars_namespace: String,
    /// Name of the environment variable provision task.
    #[serde(default = "default_provision_task_name")]
    pub env_vars_provision_task_name: String,
    /// Name of the environment variable destroy task.
    #[serde(default = "default_destroy_task_name")]
    pub env_vars_destroy_task_name: String,
    /// Name of the environment variable ensure task.
    #[serde(default = "default_ensure_task_name")]
    pub env_vars_ensure_task_name: String,

    /// Sub-namespace of the SSH key tasks.
    #[serde(default = "default_ssh_keys_namespace")]
    pub ssh_keys_namespace: String,
    /// Name of the SSH key provision task.
    #[serde(default = "default_provision_task_name")]
    pub ssh_keys_provision_task_name: String,
    /// Name of the SSH key destroy task.
    #[serde(default = "default_destroy_task_name")]
    pub ssh_keys_destroy_task_name: String,
    /// Name of the SSH key ensure task.
    #[serde(default = "default_ensure_task_name")]
    pub ssh_keys_ensure_task_name: String,

    /// Sub-namespace of the checkout key tasks.
    #[serde(default = "default_checkout_keys_namespace")]
    pub checkout_keys_namespace: String,
    /// Name of the checkout key provision task.
    #[serde(default = "default_provision_task_name")]
    pub checkout_keys_provision_task_name: String,
    /// Name of the checkout key destroy task.
    #[serde(default = "default_destroy_task_name")]
    pub checkout_keys_destroy_task_name: String,
    /// Name of the checkout key ensure task.
    #[serde(default = "default_ensure_task_name")]
    pub checkout_keys_ensure_task_name: String,

    /// Sub-namespace of the project tasks.
    #[serde(default = "default_project_namespace")]
    pub project_namespace: String,
    /// Name of the follow task.
    #[serde(default = "default_follow_task_name")]
    pub project_follow_task_name: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            namespace: None,
            params: ProjectParameters::default(),
            environment_variables: BTreeMap::new(),
            ssh_keys: Vec::new(),
            checkout_keys: Vec::new(),
            env_vars_namespace: default_env_vars_namespace(),
            env_vars_provision_task_name: default_provision_task_name(),
            env_vars_destroy_task_name: default_destroy_task_name(),
            env_vars_ensure_task_name: default_ensure_task_name(),
            ssh_keys_namespace: default_ssh_keys_namespace(),
            ssh_keys_provision_task_name: default_provision_task_name(),
            ssh_keys_destroy_task_name: default_destroy_task_name(),
            ssh_keys_ensure_task_name: default_ensure_task_name(),
            checkout_keys_namespace: default_checkout_keys_namespace(),
            checkout_keys_provision_task_name: default_provision_task_name(),
            checkout_keys_destroy_task_name: default_destroy_task_name(),
            checkout_keys_ensure_task_name: default_ensure_task_name(),
            project_namespace: default_project_namespace(),
            project_follow_task_name: default_follow_task_name(),
        }
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("namespace", &self.namespace)
            .field("params", &self.params)
            .field(
                "environment_variables",
                &self.environment_variables.keys().collect::<Vec<_>>(),
            )
            .field("ssh_keys", &self.ssh_keys)
            .field("checkout_keys", &self.checkout_keys)
            .field("env_vars_names", &self.env_vars_names())
            .field("ssh_keys_names", &self.ssh_keys_names())
            .field("checkout_keys_names", &self.checkout_keys_names())
            .field("project_namespace", &self.project_namespace)
            .field("project_follow_task_name", &self.project_follow_task_name)
            .finish()
    }
}

impl Project {
    /// A task set for `project_slug` with default names and nothing to provision.
    #[must_use]
    pub fn new(project_slug: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            params: ProjectParameters::new(project_slug, api_token),
            ..Self::default()
        }
    }

    /// Define everything in `namespace`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Talk to `base_url` instead of the public API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.params.base_url = base_url.into();
        self
    }

    /// Add an environment variable to provision.
    #[must_use]
    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
        self
    }

    /// Add an SSH key to provision.
    #[must_use]
    pub fn with_ssh_key(mut self, ssh_key: SshKeySpec) -> Self {
        self.ssh_keys.push(ssh_key);
        self
    }

    /// Add a checkout key to generate.
    #[must_use]
    pub fn with_checkout_key(mut self, checkout_key: CheckoutKeySpec) -> Self {
        self.checkout_keys.push(checkout_key);
        self
    }

    /// Adjust any field before definition.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    fn env_vars_names(&self) -> TaskNames {
        TaskNames {
            provision_task_name: self.env_vars_provision_task_name.clone(),
            destroy_task_name: self.env_vars_destroy_task_name.clone(),
            ensure_task_name: self.env_vars_ensure_task_name.clone(),
        }
    }

    fn ssh_keys_names(&self) -> TaskNames {
        TaskNames {
            provision_task_name: self.ssh_keys_provision_task_name.clone(),
            destroy_task_name: self.ssh_keys_destroy_task_name.clone(),
            ensure_task_name: self.ssh_keys_ensure_task_name.clone(),
        }
    }

    fn checkout_keys_names(&self) -> TaskNames {
        TaskNames {
            provision_task_name: self.checkout_keys_provision_task_name.clone(),
            destroy_task_name: self.checkout_keys_destroy_task_name.clone(),
            ensure_task_name: self.checkout_keys_ensure_task_name.clone(),
        }
    }

    /// The tasks this set defines.
    #[must_use]
    pub fn task_group(&self) -> TaskGroup {
        TaskGroup::new(self.namespace.as_deref())
            .with_group(environment_variables::group(
                Some(self.env_vars_namespace.as_str()),
                &self.params,
                &self.environment_variables,
                &self.env_vars_names(),
            ))
            .with_group(ssh_keys::group(
                Some(self.ssh_keys_namespace.as_str()),
                &self.params,
                &self.ssh_keys,
                &self.ssh_keys_names(),
            ))
            .with_group(checkout_keys::group(
                Some(self.checkout_keys_namespace.as_str()),
                &self.params,
                &self.checkout_keys,
                &self.checkout_keys_names(),
            ))
            .with_group(
                TaskGroup::new(Some(self.project_namespace.as_str())).with_task(
                    Follow::new(self.params.clone()).with_name(&self.project_follow_task_name),
                ),
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
