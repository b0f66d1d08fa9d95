//! Machine-readable output for `--format json`.
//!
//! Every JSON body names the verb, the result, and the run it came from;
//! the verb-specific fields sit alongside at the top level.

use crate::core::error::RevopsError;
use serde::Serialize;
use ulid::Ulid;

pub fn new_run_id() -> String {
    Ulid::new().to_string()
}

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub cmd: String,
    pub status: &'static str,
    pub run_id: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(cmd: impl Into<String>, status: &'static str, body: T) -> Self {
        Envelope {
            cmd: cmd.into(),
            status,
            run_id: new_run_id(),
            body,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, RevopsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
