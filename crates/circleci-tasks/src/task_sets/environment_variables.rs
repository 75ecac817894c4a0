//! Environment variable task set.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::TaskNames;
use crate::error::Result;
use crate::group::TaskGroup;
use crate::runner::TaskRunner;
use crate::task::ProjectParameters;
use crate::tasks::environment_variables::{Destroy, Provision};
use crate::tasks::{Ensure, Resource};

/// Provision, destroy and ensure tasks for environment variables.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariables {
    /// Namespace to define the tasks in; top level when unset.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Project coordinates.
    #[serde(flatten)]
    pub params: ProjectParameters,

    /// Variables to provision.
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,

    /// Task names.
    #[serde(flatten)]
    pub names: TaskNames,
}

impl EnvironmentVariables {
    /// A task set for `project_slug` with default names and no variables.
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

    /// Add a variable to provision.
    #[must_use]
    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
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
            &self.environment_variables,
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

impl fmt::Debug for EnvironmentVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentVariables")
            .field("namespace", &self.namespace)
            .field("params", &self.params)
            .field(
                "environment_variables",
                &self.environment_variables.keys().collect::<Vec<_>>(),
            )
            .field("names", &self.names)
            .finish()
    }
}

pub(super) fn group(
    namespace: Option<&str>,
    params: &ProjectParameters,
    environment_variables: &BTreeMap<String, String>,
    names: &TaskNames,
) -> TaskGroup {
    TaskGroup::new(namespace)
        .with_task(
            Provision::new(params.clone())
                .with_name(&names.provision_task_name)
                .with_environment_variables(environment_variables.clone()),
        )
        .with_task(Destroy::new(params.clone()).with_name(&names.destroy_task_name))
        .with_task(
            Ensure::new(Resource::EnvironmentVariables, params.project_slug.clone())
                .with_name(&names.ensure_task_name)
                .with_provision_task_name(&names.provision_task_name)
                .with_destroy_task_name(&names.destroy_task_name),
        )
}
