//! Expansion of a task into the ordered steps it performs.

use crate::core::config::Config;
use crate::core::exec::{Executor, Invocation};
use crate::tasks::docs;
use crate::tasks::{Task, help};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// One invocation of the compose tool with these trailing arguments.
    Compose { args: Vec<String> },
    /// One informational line on stdout.
    Print { line: String },
    /// Open `url` with the first available opener, else print a hint.
    OpenDocs { url: String, openers: Vec<String> },
}

impl Step {
    fn compose<I, S>(args: I) -> Step
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Step::Compose {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn print(line: impl Into<String>) -> Step {
        Step::Print { line: line.into() }
    }
}

/// Steps for `task` under `config`, in execution order.
pub fn plan(task: Task, config: &Config) -> Vec<Step> {
    match task {
        Task::Help => help::render_lines().into_iter().map(Step::print).collect(),
        Task::Build => vec![Step::compose(["build"])],
        Task::Up => vec![
            Step::compose(["up", "-d"]),
            Step::print(format!("Service is running at {}", config.service_url())),
            Step::print(format!("API docs: {}", config.docs_url())),
        ],
        Task::Down => vec![Step::compose(["down"])],
        Task::Logs => vec![Step::compose(["logs", "-f"])],
        Task::Test => vec![exec_in_service(config, config.test_argv())],
        Task::Clean => vec![Step::compose(["down", "-v"])],
        Task::Status => vec![Step::compose(["ps"])],
        Task::Shell => vec![exec_in_service(config, config.shell_argv())],
        Task::Docs => vec![Step::OpenDocs {
            url: config.docs_url(),
            openers: config.openers.clone(),
        }],
        Task::Dev => vec![Step::compose(["up"])],
        Task::BuildForce => vec![Step::compose(["build", "--no-cache"])],
        Task::Info => info_lines(config).into_iter().map(Step::print).collect(),
        Task::Start | Task::Stop => plan(task.resolve(), config),
        Task::Restart => {
            let mut steps = plan(Task::Down, config);
            steps.extend(plan(Task::Up, config));
            steps
        }
    }
}

fn exec_in_service(config: &Config, command: Vec<String>) -> Step {
    let mut args = vec!["exec".to_string(), config.service.clone()];
    args.extend(command);
    Step::Compose { args }
}

/// Static project summary printed by `info`.
pub fn info_lines(config: &Config) -> Vec<String> {
    vec![
        config.project_name.clone(),
        format!("API:   {}", config.service_url()),
        format!("Docs:  {}", config.docs_url()),
        format!("ReDoc: {}", config.redoc_url()),
    ]
}

/// Concrete compose invocation for trailing `args`.
pub fn compose_invocation(config: &Config, args: &[String], dir: Option<&Path>) -> Invocation {
    let argv = config.compose_argv();
    let (program, leading) = match argv.split_first() {
        Some((program, leading)) => (program.as_str(), leading),
        None => ("docker", &[][..]),
    };
    Invocation::new(program, leading.iter().chain(args).cloned()).in_dir(dir)
}

/// What a step would do, for `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Preview {
    Run { command: String },
    Print { line: String },
}

impl Preview {
    pub fn render(&self) -> String {
        match self {
            Preview::Run { command } => format!("run: {}", command),
            Preview::Print { line } => format!("print: {}", line),
        }
    }
}

/// Resolve steps to the invocations and lines they would produce.
///
/// Opener probing is read-only, so it runs for real against `executor`.
pub fn preview<E: Executor + ?Sized>(
    steps: &[Step],
    config: &Config,
    dir: Option<&Path>,
    executor: &E,
) -> Vec<Preview> {
    steps
        .iter()
        .map(|step| match step {
            Step::Compose { args } => Preview::Run {
                command: compose_invocation(config, args, dir).command_line(),
            },
            Step::Print { line } => Preview::Print { line: line.clone() },
            Step::OpenDocs { url, openers } => {
                match docs::resolve_opener(openers, executor) {
                    Some(opener) => Preview::Run {
                        command: docs::opener_invocation(opener, url, dir).command_line(),
                    },
                    None => Preview::Print {
                        line: docs::fallback_message(url),
                    },
                }
            }
        })
        .collect()
}
