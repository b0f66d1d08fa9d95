use revops::core::config::Config;
use revops::core::error::RevopsError;
use revops::core::exec::{Executor, Invocation, Outcome};
use revops::tasks::{Task, dispatch::dispatch, help};
use revops::{Cli, OutputFormat, run_with};
use tempfile::tempdir;

/// Records everything a dispatch asks for, in order.
#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    exit_codes: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Run(Invocation),
    Print(String),
}

impl Recorder {
    fn invocations(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Run(inv) => Some(inv.command_line()),
                Event::Print(_) => None,
            })
            .collect()
    }

    fn printed(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Print(line) => Some(line.clone()),
                Event::Run(_) => None,
            })
            .collect()
    }
}

impl Executor for Recorder {
    fn run(&mut self, invocation: &Invocation) -> Result<Outcome, RevopsError> {
        self.events.push(Event::Run(invocation.clone()));
        let code = if self.exit_codes.is_empty() {
            0
        } else {
            self.exit_codes.remove(0)
        };
        Ok(Outcome { code })
    }

    fn is_available(&self, _program: &str) -> bool {
        false
    }

    fn print_line(&mut self, line: &str) {
        self.events.push(Event::Print(line.to_string()));
    }
}

fn verb_task(verb: &str) -> Task {
    Task::from_verb(verb).unwrap_or_else(|| panic!("help lists unknown verb {}", verb))
}

#[test]
fn every_listed_command_dispatches_its_compose_calls() {
    let config = Config::default();
    for entry in help::entries() {
        let task = verb_task(entry.verb);
        let mut rec = Recorder::default();
        let outcome = dispatch(task, &config, None, &mut rec).unwrap();
        assert!(outcome.success(), "{}", entry.verb);

        let target = match entry.alias_of {
            Some(alias) => verb_task(alias),
            None => task,
        };
        let expected = match target {
            Task::Restart => 2,
            Task::Help | Task::Docs | Task::Info => 0,
            _ => 1,
        };
        assert_eq!(rec.invocations().len(), expected, "{}", entry.verb);
    }
}

#[test]
fn aliases_issue_the_same_invocations_as_targets() {
    let config = Config::default();
    for (alias, target) in [(Task::Start, Task::Up), (Task::Stop, Task::Down)] {
        let mut a = Recorder::default();
        let mut t = Recorder::default();
        dispatch(alias, &config, None, &mut a).unwrap();
        dispatch(target, &config, None, &mut t).unwrap();
        assert_eq!(a.events, t.events);
    }
}

#[test]
fn restart_completes_down_before_up_begins() {
    let mut rec = Recorder::default();
    dispatch(Task::Restart, &Config::default(), None, &mut rec).unwrap();

    let down = rec
        .events
        .iter()
        .position(|e| matches!(e, Event::Run(inv) if inv.args.last().map(String::as_str) == Some("down")))
        .unwrap();
    let up = rec
        .events
        .iter()
        .position(|e| matches!(e, Event::Run(inv) if inv.args.contains(&"up".to_string())))
        .unwrap();
    assert!(down < up);
    assert_eq!(
        rec.printed(),
        vec![
            "Service is running at http://localhost:8000",
            "API docs: http://localhost:8000/docs",
        ]
    );
}

#[test]
fn non_zero_exit_is_returned_unchanged() {
    let mut rec = Recorder {
        exit_codes: vec![130],
        ..Recorder::default()
    };
    let outcome = dispatch(Task::Logs, &Config::default(), None, &mut rec).unwrap();
    assert_eq!(outcome.code, 130);
}

#[test]
fn compose_runs_in_project_directory() {
    let tmp = tempdir().unwrap();
    let mut rec = Recorder::default();
    dispatch(Task::Status, &Config::default(), Some(tmp.path()), &mut rec).unwrap();
    match &rec.events[0] {
        Event::Run(inv) => assert_eq!(inv.dir.as_deref(), Some(tmp.path())),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn repeated_dispatch_is_stable() {
    let config = Config::default();
    let mut first = Recorder::default();
    dispatch(Task::BuildForce, &config, None, &mut first).unwrap();
    for _ in 0..3 {
        let mut again = Recorder::default();
        dispatch(Task::BuildForce, &config, None, &mut again).unwrap();
        assert_eq!(again.events, first.events);
    }
}

fn cli(task: Option<Task>, dir: &std::path::Path) -> Cli {
    Cli {
        task,
        dry_run: false,
        format: OutputFormat::Text,
        config: None,
        dir: Some(dir.to_path_buf()),
    }
}

#[test]
fn run_with_returns_compose_exit_code() {
    let tmp = tempdir().unwrap();
    let mut rec = Recorder {
        exit_codes: vec![5],
        ..Recorder::default()
    };
    let code = run_with(cli(Some(Task::Clean), tmp.path()), &mut rec).unwrap();
    assert_eq!(code, 5);
    assert_eq!(rec.invocations(), vec!["docker compose down -v"]);
}

#[test]
fn run_with_dry_run_never_invokes_compose() {
    let tmp = tempdir().unwrap();
    let mut rec = Recorder::default();
    let mut args = cli(Some(Task::Restart), tmp.path());
    args.dry_run = true;
    let code = run_with(args, &mut rec).unwrap();
    assert_eq!(code, 0);
    assert!(rec.invocations().is_empty());
    assert_eq!(rec.printed()[0], "run: docker compose down");
}
