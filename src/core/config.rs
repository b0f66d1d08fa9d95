//! Layered runner configuration.
//!
//! Built-in defaults, then `revops.toml` (or an explicit `--config` file),
//! then `REVOPS_*` environment variables.

use crate::core::error::RevopsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the project directory.
pub const CONFIG_FILE: &str = "revops.toml";

pub const ENV_COMPOSE: &str = "REVOPS_COMPOSE";
pub const ENV_SERVICE: &str = "REVOPS_SERVICE";
pub const ENV_BASE_URL: &str = "REVOPS_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Human-readable name printed by `info`.
    pub project_name: String,
    /// Compose program line, split on whitespace (`docker compose`, `docker-compose`).
    pub compose: String,
    /// Application service that hosts the API.
    pub service: String,
    pub base_url: String,
    pub docs_path: String,
    pub redoc_path: String,
    /// Test entry point run inside the service container.
    pub test_command: String,
    /// Interactive shell started inside the service container.
    pub shell: String,
    /// Browser openers, probed in order.
    pub openers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project_name: "Reviewer Assignment Service".to_string(),
            compose: "docker compose".to_string(),
            service: "web".to_string(),
            base_url: "http://localhost:8000".to_string(),
            docs_path: "/docs".to_string(),
            redoc_path: "/redoc".to_string(),
            test_command: "python test.py".to_string(),
            shell: "bash".to_string(),
            openers: vec!["xdg-open".to_string(), "open".to_string()],
        }
    }
}

impl Config {
    /// Load config for `project_dir`, honoring an explicit file when given.
    ///
    /// A missing `revops.toml` falls back to defaults; a missing explicit
    /// file is an error.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Config, RevopsError> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(RevopsError::ConfigError(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => {
                let path = project_dir.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, RevopsError> {
        let content = fs::read_to_string(path).map_err(RevopsError::IoError)?;
        toml::from_str(&content)
            .map_err(|e| RevopsError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Overlay environment overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(compose) = non_empty(ENV_COMPOSE) {
            self.compose = compose;
        }
        if let Some(service) = non_empty(ENV_SERVICE) {
            self.service = service;
        }
        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<(), RevopsError> {
        if self.compose_argv().is_empty() {
            return Err(RevopsError::ConfigError(
                "`compose` must name a program".into(),
            ));
        }
        if self.service.trim().is_empty() {
            return Err(RevopsError::ConfigError("`service` must not be empty".into()));
        }
        if split_words(&self.test_command).is_empty() {
            return Err(RevopsError::ConfigError(
                "`test_command` must not be empty".into(),
            ));
        }
        if split_words(&self.shell).is_empty() {
            return Err(RevopsError::ConfigError("`shell` must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(RevopsError::ConfigError(format!(
                "`base_url` must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn compose_argv(&self) -> Vec<String> {
        split_words(&self.compose)
    }

    pub fn test_argv(&self) -> Vec<String> {
        split_words(&self.test_command)
    }

    pub fn shell_argv(&self) -> Vec<String> {
        split_words(&self.shell)
    }

    pub fn service_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    pub fn docs_url(&self) -> String {
        join_url(&self.service_url(), &self.docs_path)
    }

    pub fn redoc_url(&self) -> String {
        join_url(&self.service_url(), &self.redoc_path)
    }
}

fn split_words(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
