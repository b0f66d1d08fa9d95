use revops::core::config::{CONFIG_FILE, Config};
use revops::core::envelope::Envelope;
use serde::Serialize;
use revops::core::error::RevopsError;
use std::fs;
use tempfile::tempdir;

#[test]
fn explicit_config_file_is_used_over_project_file() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join(CONFIG_FILE), "service = \"from-project\"\n").unwrap();
    let explicit = tmp.path().join("ci.toml");
    fs::write(&explicit, "service = \"from-explicit\"\n").unwrap();

    let config = Config::load(tmp.path(), Some(&explicit)).unwrap();
    assert_eq!(config.service, "from-explicit");
    assert_eq!(config.compose, Config::default().compose);
}

#[test]
fn full_config_file_round_trips_all_keys() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(
        &path,
        r#"
project_name = "Reviewers"
compose = "podman-compose"
service = "api"
base_url = "https://reviewers.local"
docs_path = "api-docs"
redoc_path = "/api-redoc"
test_command = "pytest -q"
shell = "sh"
openers = ["open"]
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.docs_url(), "https://reviewers.local/api-docs");
    assert_eq!(config.redoc_url(), "https://reviewers.local/api-redoc");
    assert_eq!(config.test_argv(), vec!["pytest", "-q"]);
    assert_eq!(config.shell_argv(), vec!["sh"]);
    assert_eq!(config.openers, vec!["open"]);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    fs::write(&path, "compose = [unterminated\n").unwrap();
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, RevopsError::ConfigError(_)));
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn empty_test_command_fails_validation() {
    let config = Config {
        test_command: String::new(),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(RevopsError::ConfigError(_))));
}

#[test]
fn error_exit_codes() {
    assert_eq!(RevopsError::NotFound("x".into()).exit_code(), 127);
    assert_eq!(RevopsError::ConfigError("x".into()).exit_code(), 1);
}

#[derive(Serialize)]
struct Steps {
    steps: Vec<&'static str>,
}

#[test]
fn envelope_renders_flat_json() {
    let json = Envelope::new("restart", "planned", Steps { steps: vec!["down", "up -d"] })
        .to_pretty_json()
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(body["cmd"], "restart");
    assert_eq!(body["status"], "planned");
    assert_eq!(body["steps"][1], "up -d");
    assert!(body["run_id"].is_string());
}
