//! revops: task runner for the reviewer assignment service
//!
//! Every operator verb maps to one invocation of the compose tool that
//! builds and runs the service's containers. `revops` adds no behavior of
//! its own on top: the tool's output streams straight through and its exit
//! status becomes ours.
//!
//! # Examples
//!
//! ```bash
//! # Build images and start the stack in the background
//! revops build
//! revops up
//!
//! # Run the test entry point inside the web container
//! revops test
//!
//! # Show what `restart` would run, without running it
//! revops --dry-run restart
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: configuration, errors, logging, process execution
//! - [`tasks`]: the command table, step plans, and dispatch

pub mod core;
pub mod tasks;

use clap::{Parser, ValueEnum};
use crate::core::{
    config::Config,
    envelope::Envelope,
    error::{self, RevopsError},
    exec::{Executor, Outcome, SystemExecutor},
    logging,
};
use serde::Serialize;
use std::path::PathBuf;
use tasks::help::HelpEntry;
use tasks::plan::Preview;
use tasks::{Task, dispatch, help, plan};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "revops",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build, run, and inspect the reviewer assignment service containers",
    after_help = "Run `revops help` for the list of commands."
)]
pub struct Cli {
    /// Command to run (defaults to `help`).
    #[clap(value_parser = tasks::parse_verb)]
    pub task: Option<Task>,
    /// Print the commands that would run instead of running them.
    #[clap(long)]
    pub dry_run: bool,
    /// Output format for `help`, `info`, and `--dry-run`: 'text' or 'json'.
    #[clap(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
    /// Config file (defaults to `revops.toml` in the project directory).
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Project directory holding the compose file (defaults to current directory).
    #[clap(short = 'C', long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PlanBody {
    dry_run: bool,
    steps: Vec<Preview>,
}

#[derive(Debug, Serialize)]
struct HelpBody {
    commands: Vec<HelpEntry>,
}

#[derive(Debug, Serialize)]
struct InfoBody {
    project: String,
    api: String,
    docs: String,
    redoc: String,
}

pub fn run() -> Result<i32, error::RevopsError> {
    let cli = Cli::parse();
    logging::init();
    let mut executor = SystemExecutor::new();
    run_with(cli, &mut executor)
}

/// Run a parsed command line against `executor`. Returns the exit code.
pub fn run_with<E: Executor + ?Sized>(cli: Cli, executor: &mut E) -> Result<i32, RevopsError> {
    let project_dir = match cli.dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    let config = Config::load(&project_dir, cli.config.as_deref())?;
    let task = cli.task.unwrap_or(Task::Help);

    if cli.dry_run {
        let steps = plan::plan(task, &config);
        let preview = plan::preview(&steps, &config, Some(project_dir.as_path()), &*executor);
        match cli.format {
            OutputFormat::Json => {
                let body = PlanBody {
                    dry_run: true,
                    steps: preview,
                };
                executor.print_line(&Envelope::new(task.verb(), "planned", body).to_pretty_json()?);
            }
            OutputFormat::Text => {
                for item in &preview {
                    executor.print_line(&item.render());
                }
            }
        }
        return Ok(0);
    }

    if cli.format == OutputFormat::Json {
        let json = match task.resolve() {
            Task::Help => Envelope::new(
                task.verb(),
                "ok",
                HelpBody {
                    commands: help::entries(),
                },
            )
            .to_pretty_json()?,
            Task::Info => Envelope::new(
                task.verb(),
                "ok",
                InfoBody {
                    project: config.project_name.clone(),
                    api: config.service_url(),
                    docs: config.docs_url(),
                    redoc: config.redoc_url(),
                },
            )
            .to_pretty_json()?,
            _ => {
                return Err(RevopsError::ValidationError(format!(
                    "--format json applies to help, info, and --dry-run, not '{}'",
                    task
                )));
            }
        };
        executor.print_line(&json);
        return Ok(0);
    }

    let outcome: Outcome = dispatch::dispatch(task, &config, Some(project_dir.as_path()), executor)?;
    Ok(outcome.code)
}
