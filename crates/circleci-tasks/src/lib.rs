//! CircleCI Tasks - named, namespaced tasks for configuring CircleCI projects.
//!
//! Tasks are grouped into task sets, registered on a [`TaskRunner`] under
//! `:`-separated names, and invoked one at a time.

#![warn(rust_2024_compatibility, missing_docs, missing_debug_implementations)]

pub mod error;
pub mod group;
pub mod runner;
pub mod task;
pub mod task_sets;
pub mod tasks;

pub use error::{Result, TaskError};
pub use group::TaskGroup;
pub use runner::{Scope, TaskListing, TaskRunner};
pub use task::{ProjectParameters, Task};

/// Define the environment variable tasks on `runner`.
///
/// # Errors
///
/// Returns an error if a task name is already taken.
pub fn define_environment_variables_tasks(
    runner: &mut TaskRunner,
    task_set: &task_sets::EnvironmentVariables,
) -> Result<()> {
    task_set.define_on(runner)
}

/// Define the SSH key tasks on `runner`.
///
/// # Errors
///
/// Returns an error if a task name is already taken.
pub fn define_ssh_keys_tasks(runner: &mut TaskRunner, task_set: &task_sets::SshKeys) -> Result<()> {
    task_set.define_on(runner)
}

/// Define the single SSH key task on `runner`.
///
/// # Errors
///
/// Returns an error if the task name is already taken.
pub fn define_ssh_key_tasks(runner: &mut TaskRunner, task_set: &task_sets::SshKey) -> Result<()> {
    task_set.define_on(runner)
}

/// Define the checkout key tasks on `runner`.
///
/// # Errors
///
/// Returns an error if a task name is already taken.
pub fn define_checkout_keys_tasks(
    runner: &mut TaskRunner,
    task_set: &task_sets::CheckoutKeys,
) -> Result<()> {
    task_set.define_on(runner)
}

/// Define every project task on `runner`.
///
/// # Errors
///
/// Returns an error if a task name is already taken.
pub fn define_project_tasks(runner: &mut TaskRunner, task_set: &task_sets::Project) -> Result<()> {
    task_set.define_on(runner)
}

/// Re-export common types for convenience.
pub mod prelude {
    pub use crate::task_sets::{CheckoutKeys, EnvironmentVariables, Project, SshKey, SshKeys};
    pub use crate::{ProjectParameters, Result, Scope, Task, TaskError, TaskGroup, TaskRunner};
}
