//! CLI argument parsing for circleci-tasks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default location of the project file.
pub const DEFAULT_CONFIG: &str = "circleci.yml";

/// Default namespace the project tasks are defined in.
pub const DEFAULT_NAMESPACE: &str = "circle_ci";

/// circleci-tasks - provision and tear down CircleCI project settings.
///
/// Reads a YAML project file, defines the provision, destroy, ensure and
/// follow tasks for it, and runs one of them.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the YAML project file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// API token; overrides the one in the project file.
    #[arg(long, env = "CIRCLECI_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Namespace to define tasks in; overrides the one in the project file.
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every defined task with its description.
    List,

    /// Run a task by name.
    Run(RunArgs),
}

/// Arguments for the run subcommand.
#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// Task name, either fully qualified or relative to the namespace.
    pub task: String,

    /// Positional arguments forwarded to the task.
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}
