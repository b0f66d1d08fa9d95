//! The command table.
//!
//! Every operator verb is a [`Task`] variant. The table is fixed at compile
//! time: [`Task::ALL`] lists the variants in declaration order and the verb,
//! description, and alias target of each come from `match` arms, so a lookup
//! can never change the mapping.

pub mod dispatch;
pub mod docs;
pub mod help;
pub mod plan;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    Help,
    Build,
    Up,
    Down,
    Logs,
    Test,
    Clean,
    Start,
    Stop,
    Restart,
    Status,
    Shell,
    Docs,
    Dev,
    BuildForce,
    Info,
}

impl Task {
    pub const ALL: [Task; 16] = [
        Task::Help,
        Task::Build,
        Task::Up,
        Task::Down,
        Task::Logs,
        Task::Test,
        Task::Clean,
        Task::Start,
        Task::Stop,
        Task::Restart,
        Task::Status,
        Task::Shell,
        Task::Docs,
        Task::Dev,
        Task::BuildForce,
        Task::Info,
    ];

    pub fn verb(self) -> &'static str {
        match self {
            Task::Help => "help",
            Task::Build => "build",
            Task::Up => "up",
            Task::Down => "down",
            Task::Logs => "logs",
            Task::Test => "test",
            Task::Clean => "clean",
            Task::Start => "start",
            Task::Stop => "stop",
            Task::Restart => "restart",
            Task::Status => "status",
            Task::Shell => "shell",
            Task::Docs => "docs",
            Task::Dev => "dev",
            Task::BuildForce => "build-force",
            Task::Info => "info",
        }
    }

    /// One-line description shown by `help`.
    pub fn about(self) -> &'static str {
        match self {
            Task::Help => "Show this help",
            Task::Build => "Build container images",
            Task::Up => "Start services in the background",
            Task::Down => "Stop services",
            Task::Logs => "Follow service logs",
            Task::Test => "Run the test suite inside the web container",
            Task::Clean => "Stop services and remove volumes",
            Task::Start => "Alias for up",
            Task::Stop => "Alias for down",
            Task::Restart => "Restart services (down, then up)",
            Task::Status => "Show container status",
            Task::Shell => "Open a shell inside the web container",
            Task::Docs => "Open the API documentation in a browser",
            Task::Dev => "Start services in the foreground",
            Task::BuildForce => "Rebuild images without cache",
            Task::Info => "Show project information",
        }
    }

    /// Target of a one-to-one alias. `restart` is a sequence, not an alias.
    pub fn alias_of(self) -> Option<Task> {
        match self {
            Task::Start => Some(Task::Up),
            Task::Stop => Some(Task::Down),
            _ => None,
        }
    }

    /// Follow aliases to the task that does the work.
    pub fn resolve(self) -> Task {
        self.alias_of().unwrap_or(self)
    }

    pub fn from_verb(verb: &str) -> Option<Task> {
        Task::ALL.iter().copied().find(|task| task.verb() == verb)
    }

    /// Whether the task talks to the compose tool at all.
    pub fn uses_compose(self) -> bool {
        !matches!(self.resolve(), Task::Help | Task::Docs | Task::Info)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// clap value parser for the verb argument.
pub fn parse_verb(verb: &str) -> Result<Task, String> {
    Task::from_verb(verb).ok_or_else(|| {
        let mut verbs: Vec<&str> = Task::ALL.iter().map(|t| t.verb()).collect();
        verbs.sort_unstable();
        format!(
            "unknown command '{}' (expected one of: {})",
            verb,
            verbs.join(", ")
        )
    })
}
