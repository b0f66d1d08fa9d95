//! Process execution seam.
//!
//! Every external effect goes through [`Executor`], so dispatch can be driven
//! against a recording fake in tests and against real processes otherwise.

use crate::core::error::RevopsError;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info, warn};

/// One concrete external program invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            dir: None,
        }
    }

    pub fn in_dir(mut self, dir: Option<&Path>) -> Self {
        self.dir = dir.map(Path::to_path_buf);
        self
    }

    /// Shell-like rendering for logs and `--dry-run` output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit code of a finished invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub code: i32,
}

impl Outcome {
    pub const SUCCESS: Outcome = Outcome { code: 0 };

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Signal termination maps to `128 + signal`, as shells report it.
    pub fn from_status(status: ExitStatus) -> Outcome {
        if let Some(code) = status.code() {
            return Outcome { code };
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Outcome { code: 128 + signal };
            }
        }
        Outcome { code: 1 }
    }
}

pub trait Executor {
    /// Run `invocation` to completion with inherited stdio.
    fn run(&mut self, invocation: &Invocation) -> Result<Outcome, RevopsError>;

    /// Whether `program` resolves to an executable.
    fn is_available(&self, program: &str) -> bool;

    /// Write one informational line for the operator.
    fn print_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Executes invocations as real child processes.
#[derive(Debug, Default)]
pub struct SystemExecutor {
    search_path: Option<OsString>,
}

impl SystemExecutor {
    pub fn new() -> Self {
        SystemExecutor {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Executor that resolves programs against an explicit `PATH` value.
    pub fn with_search_path(search_path: OsString) -> Self {
        SystemExecutor {
            search_path: Some(search_path),
        }
    }
}

impl Executor for SystemExecutor {
    fn run(&mut self, invocation: &Invocation) -> Result<Outcome, RevopsError> {
        info!(command = %invocation.command_line(), "spawning");
        // Resolve against our own search path so probing and spawning agree.
        let program = self
            .search_path
            .as_ref()
            .and_then(|path| find_in_path(&invocation.program, path))
            .map(PathBuf::into_os_string)
            .unwrap_or_else(|| OsString::from(&invocation.program));
        let mut cmd = Command::new(program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RevopsError::NotFound(format!(
                    "program '{}' (is it installed and on PATH?)",
                    invocation.program
                ))
            } else {
                RevopsError::IoError(e)
            }
        })?;

        let outcome = Outcome::from_status(status);
        if !outcome.success() {
            warn!(
                command = %invocation.command_line(),
                code = outcome.code,
                "command exited non-zero"
            );
        }
        Ok(outcome)
    }

    fn is_available(&self, program: &str) -> bool {
        let found = match &self.search_path {
            Some(path) => find_in_path(program, path).is_some(),
            None => false,
        };
        debug!(program, found, "probed program");
        found
    }
}

/// Resolve `program` against a `PATH`-style list, `which`-style.
///
/// Names containing a path separator are checked directly.
pub fn find_in_path(program: &str, search_path: &OsString) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return is_executable(direct).then(|| direct.to_path_buf());
    }
    std::env::split_paths(search_path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
