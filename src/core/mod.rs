//! Shared runtime pieces: configuration, errors, logging, and the process
//! execution seam every task goes through.

pub mod config;
pub mod envelope;
pub mod error;
pub mod exec;
pub mod logging;
