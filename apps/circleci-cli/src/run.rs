//! Command logic for circleci-tasks.

use circleci_tasks::task_sets::Project;
use circleci_tasks::{Scope, TaskRunner};
use tracing::info;

use crate::cli::RunArgs;
use crate::error::Result as CliResult;
use crate::output::OutputFormatter;

/// Define every task of `project` on `runner`.
///
/// # Errors
///
/// Returns an error if two tasks end up with the same name.
pub fn define(mut runner: TaskRunner, project: &Project) -> CliResult<TaskRunner> {
    circleci_tasks::define_project_tasks(&mut runner, project)?;
    Ok(runner)
}

/// Scope that task names given on the command line are resolved from.
#[must_use]
pub fn command_scope(project: &Project) -> Scope {
    project
        .namespace
        .as_deref()
        .map_or_else(Scope::root, |namespace| Scope::root().child(namespace))
}

/// Execute the list command.
pub fn list(runner: &TaskRunner, output: &OutputFormatter) {
    output.task_list(&runner.list());
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the task is unknown or fails.
#[tracing::instrument(skip(runner, scope, args, output), fields(task = %args.task))]
pub async fn run(
    runner: &TaskRunner,
    scope: &Scope,
    args: &RunArgs,
    output: &OutputFormatter,
) -> CliResult<()> {
    info!(args = ?args.args, "Starting run command");
    runner.invoke_in_scope(&args.task, scope, &args.args).await?;
    output.success(&format!("Task '{}' completed", args.task));
    Ok(())
}
