//! Help listing.
//!
//! Sorted by verb, so the output never depends on the order variants are
//! declared in.

use crate::tasks::Task;
use colored::Colorize;
use serde::Serialize;

const VERB_WIDTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub verb: &'static str,
    pub about: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<&'static str>,
}

pub fn entries() -> Vec<HelpEntry> {
    let mut entries: Vec<HelpEntry> = Task::ALL
        .iter()
        .map(|task| HelpEntry {
            verb: task.verb(),
            about: task.about(),
            alias_of: task.alias_of().map(Task::verb),
        })
        .collect();
    entries.sort_by(|a, b| a.verb.cmp(b.verb));
    entries
}

/// Text listing, verbs highlighted when colour is enabled.
pub fn render_lines() -> Vec<String> {
    let mut lines = vec!["Usage: revops <command>".to_string(), String::new()];
    lines.push("Commands:".to_string());
    lines.extend(entries().into_iter().map(|entry| {
        format!(
            "  {} {}",
            format!("{:<width$}", entry.verb, width = VERB_WIDTH).cyan(),
            entry.about
        )
    }));
    lines
}
