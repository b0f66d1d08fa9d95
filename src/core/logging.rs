//! Diagnostic logging to stderr.
//!
//! Stdout stays reserved for operator output (help, info, service URLs), so
//! the subscriber always writes to stderr. `REVOPS_LOG` takes a standard
//! `EnvFilter` directive; unset runs only show warnings.

use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "REVOPS_LOG";
pub const DEFAULT_FILTER: &str = "warn";

pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
