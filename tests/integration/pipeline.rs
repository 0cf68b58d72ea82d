//! Pipeline YAML loading and end-to-end execution of materialized tasks.

use dbt_tasks::{load_pipeline, ConfigError, DbtCommand, Task};
use std::fs;
use tempfile::TempDir;

use crate::common;

#[tokio::test]
async fn pipeline_file_materializes_and_executes() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::echo_stub(&dir);

    let yaml = format!(
        r#"
name: nightly
defaults:
  target: prod
  dbt_bin: {}
steps:
  - name: install_packages
    command: deps
  - name: nightly_models
    command: run
    models: "tag:nightly"
    verbose: false
  - command: docs-generate
"#,
        stub.display()
    );
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, yaml).unwrap();

    let pipeline = load_pipeline(&path).unwrap();
    assert_eq!(pipeline.name.as_deref(), Some("nightly"));

    let tasks = pipeline.into_tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].name(), "install_packages");
    assert_eq!(tasks[1].command(), DbtCommand::Run);
    assert_eq!(tasks[2].name(), "dbt_docs_generate");

    // Defaults landed on every step.
    for task in &tasks {
        assert_eq!(task.config().target.as_deref(), Some("prod"));
    }

    // The run step actually launches with its built argv.
    let outcome = tasks[1].execute().await.unwrap();
    let argv: Vec<&str> = outcome.output().unwrap().stdout.split_whitespace().collect();
    assert_eq!(
        argv,
        vec!["run", "--target", "prod", "--models", "tag:nightly"]
    );
}

#[test]
fn empty_pipeline_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, "name: empty\nsteps: []\n").unwrap();

    let err = load_pipeline(&path).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidPipeline(_)));
}

#[test]
fn malformed_yaml_reports_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, "steps: [whoops\n").unwrap();

    let err = load_pipeline(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("pipeline.yml"));
}

#[test]
fn unknown_command_fails_to_parse() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, "steps:\n  - command: compile\n").unwrap();

    let err = load_pipeline(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}
