//! Browser opener chain for the API docs.
//!
//! Openers are probed in order; only the first available one is invoked. When
//! none is installed the URL is printed instead and the task succeeds.

use crate::core::error::RevopsError;
use crate::core::exec::{Executor, Invocation, Outcome};
use std::path::Path;
use tracing::debug;

/// First opener in `openers` that `executor` can find.
pub fn resolve_opener<'a, E: Executor + ?Sized>(
    openers: &'a [String],
    executor: &E,
) -> Option<&'a str> {
    openers
        .iter()
        .map(String::as_str)
        .find(|opener| executor.is_available(opener))
}

pub fn opener_invocation(opener: &str, url: &str, dir: Option<&Path>) -> Invocation {
    Invocation::new(opener, [url]).in_dir(dir)
}

pub fn fallback_message(url: &str) -> String {
    format!("Open {} in your browser", url)
}

/// Open `url` with the first available opener.
///
/// The opener's exit status is returned as-is; a missing opener moves on to
/// the next one, never a failing one.
pub fn open_docs<E: Executor + ?Sized>(
    url: &str,
    openers: &[String],
    dir: Option<&Path>,
    executor: &mut E,
) -> Result<Outcome, RevopsError> {
    match resolve_opener(openers, &*executor) {
        Some(opener) => {
            debug!(opener, url, "opening docs");
            executor.run(&opener_invocation(opener, url, dir))
        }
        None => {
            debug!(url, "no browser opener found");
            executor.print_line(&fallback_message(url));
            Ok(Outcome::SUCCESS)
        }
    }
}
