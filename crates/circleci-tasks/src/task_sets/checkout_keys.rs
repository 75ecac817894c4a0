//! Checkout key task set.

use serde::{Deserialize, Serialize};

use super::TaskNames;
use crate::error::Result;
use crate::group::TaskGroup;
use crate::runner::TaskRunner;
use crate::task::ProjectParameters;
use crate::tasks::checkout_keys::{CheckoutKeySpec, Destroy, Provision};
use crate::tasks::{Ensure, Resource};

/// Provision, destroy and ensure tasks for checkout keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutKeys {
    /// Namespace to define the tasks in; top level when unset.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Project coordinates.
    #[serde(flatten)]
    pub params: ProjectParameters,

    /// Keys to have generated.
    #[serde(default)]
    pub checkout_keys: Vec<CheckoutKeySpec>,

    /// Task names.
    #[serde(flatten)]
    pub names: TaskNames,
}

impl CheckoutKeys {
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

    /// Add a key to generate.
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

    /// The tasks this set defines.
    #[must_use]
    pub fn task_group(&self) -> TaskGroup {
        group(
            self.namespace.as_deref(),
            &self.params,
            &self.checkout_keys,
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
    checkout_keys: &[CheckoutKeySpec],
    names: &TaskNames,
) -> TaskGroup {
    TaskGroup::new(namespace)
        .with_task(
            Provision::new(params.clone())
                .with_name(&names.provision_task_name)
                .with_checkout_keys(checkout_keys.to_vec()),
        )
        .with_task(Destroy::new(params.clone()).with_name(&names.destroy_task_name))
        .with_task(
            Ensure::new(Resource::CheckoutKeys, params.project_slug.clone())
                .with_name(&names.ensure_task_name)
                .with_provision_task_name(&names.provision_task_name)
                .with_destroy_task_name(&names.destroy_task_name),
        )
}
