//! circleci-tasks - command line interface for CircleCI project tasks.
//!
//! Loads a YAML project file, defines the project's task set, and lists or
//! runs its tasks.

use std::process::ExitCode;

use anyhow::{Context as AnyhowContext, Result};
use circleci_tasks::TaskRunner;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod config;
mod error;
mod output;
mod run;

use cli::{Args, Command, DEFAULT_NAMESPACE};
use config::ProjectFile;
use error::CliError;
use output::OutputFormatter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_tracing(&args)?;

    debug!("circleci-tasks starting with command: {:?}", args.command);

    let output = OutputFormatter::new();
    match execute(args, &output).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            let code = error
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            output.error(&format!("{error:#}"));
            Ok(ExitCode::from(code))
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(args: &Args) -> Result<()> {
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(log_level.into())
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

async fn execute(args: Args, output: &OutputFormatter) -> Result<()> {
    let project = ProjectFile::load(&args.config)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to load {}", args.config.display()))?
        .into_project(args.api_token, args.namespace, DEFAULT_NAMESPACE);

    let runner = TaskRunner::new()
        .map_err(CliError::from)
        .context("Failed to create HTTP client")?;
    let runner = run::define(runner, &project).context("Failed to define tasks")?;

    match &args.command {
        Command::List => run::list(&runner, output),
        Command::Run(run_args) => {
            run::run(&runner, &run::command_scope(&project), run_args, output)
                .await
                .with_context(|| format!("Task '{}' failed", run_args.task))?;
        }
    }

    Ok(())
}
