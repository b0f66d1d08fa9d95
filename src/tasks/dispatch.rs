//! Sequential execution of a task's steps.

use crate::core::config::Config;
use crate::core::envelope;
use crate::core::error::RevopsError;
use crate::core::exec::{Executor, Outcome};
use crate::tasks::plan::{self, Step};
use crate::tasks::{Task, docs};
use std::path::Path;
use tracing::{debug, info_span};

/// Run `task` to completion.
///
/// Steps run one at a time, each waited on before the next starts. The first
/// step that exits non-zero ends the run and its status is returned unchanged.
pub fn dispatch<E: Executor + ?Sized>(
    task: Task,
    config: &Config,
    dir: Option<&Path>,
    executor: &mut E,
) -> Result<Outcome, RevopsError> {
    let run_id = envelope::new_run_id();
    let span = info_span!("dispatch", task = %task, run_id = %run_id);
    let _guard = span.enter();

    let steps = plan::plan(task, config);
    debug!(resolved = %task.resolve(), steps = steps.len(), "planned");
    run_steps(&steps, config, dir, executor)
}

pub fn run_steps<E: Executor + ?Sized>(
    steps: &[Step],
    config: &Config,
    dir: Option<&Path>,
    executor: &mut E,
) -> Result<Outcome, RevopsError> {
    for step in steps {
        let outcome = match step {
            Step::Compose { args } => {
                executor.run(&plan::compose_invocation(config, args, dir))?
            }
            Step::Print { line } => {
                executor.print_line(line);
                Outcome::SUCCESS
            }
            Step::OpenDocs { url, openers } => docs::open_docs(url, openers, dir, executor)?,
        };
        if !outcome.success() {
            return Ok(outcome);
        }
    }
    Ok(Outcome::SUCCESS)
}
