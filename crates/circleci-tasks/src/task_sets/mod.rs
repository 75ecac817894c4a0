//! Task sets: bundles of related tasks under one namespace.
//!
//! A task set is a plain configuration struct with defaults. Defining it on
//! a runner first resolves cross-references between its fields (an `ensure`
//! task points at whatever its sibling provision and destroy tasks are
//! named) and then registers the resulting [`TaskGroup`](crate::TaskGroup).

mod checkout_keys;
mod environment_variables;
mod project;
mod ssh_key;
mod ssh_keys;

pub use checkout_keys::CheckoutKeys;
pub use environment_variables::EnvironmentVariables;
pub use project::Project;
pub use ssh_key::SshKey;
pub use ssh_keys::SshKeys;

use serde::{Deserialize, Serialize};

use crate::tasks::{DESTROY, ENSURE, FOLLOW, PROVISION};

/// Names of the three tasks every resource group defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNames {
    /// Name of the provision task.
    #[serde(default = "default_provision_task_name")]
    pub provision_task_name: String,

    /// Name of the destroy task.
    #[serde(default = "default_destroy_task_name")]
    pub destroy_task_name: String,

    /// Name of the ensure task.
    #[serde(default = "default_ensure_task_name")]
    pub ensure_task_name: String,
}

impl Default for TaskNames {
    fn default() -> Self {
        Self {
            provision_task_name: default_provision_task_name(),
            destroy_task_name: default_destroy_task_name(),
            ensure_task_name: default_ensure_task_name(),
        }
    }
}

fn default_provision_task_name() -> String {
    PROVISION.to_string()
}

fn default_destroy_task_name() -> String {
    DESTROY.to_string()
}

fn default_ensure_task_name() -> String {
    ENSURE.to_string()
}

fn default_follow_task_name() -> String {
    FOLLOW.to_string()
}
