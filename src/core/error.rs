use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevopsError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RevopsError {
    /// Process exit code reported by `main` when a run aborts with this error.
    ///
    /// A missing program exits 127, the shell's "command not found" code.
    pub fn exit_code(&self) -> i32 {
        match self {
            RevopsError::NotFound(_) => 127,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for RevopsError {
    fn from(err: serde_json::Error) -> Self {
        RevopsError::ValidationError(err.to_string())
    }
}
