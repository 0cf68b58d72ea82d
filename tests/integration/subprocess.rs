//! Subprocess launch behavior against stub dbt executables.

use dbt_tasks::{DbtCommand, DbtConfig, DbtTask, Task, TaskError};
use serde_json::json;
use tempfile::TempDir;

use crate::common;

#[tokio::test]
async fn argument_vector_reaches_the_subprocess() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::echo_stub(&dir);

    let config = DbtConfig::builder()
        .dbt_bin(stub.to_str().unwrap())
        .verbose(false)
        .warn_error(true)
        .target("prod")
        .models("a b")
        .var("x", 1)
        .build();
    let task = DbtTask::run(config);

    let outcome = task.execute().await.unwrap();
    let argv: Vec<&str> = outcome.output().unwrap().stdout.split_whitespace().collect();

    assert_eq!(
        argv,
        vec![
            "--warn-error",
            "run",
            "--target",
            "prod",
            "--vars",
            r#"{"x":1}"#,
            "--models",
            "a",
            "b",
        ]
    );

    // The serialized vars round-trip to the original mapping.
    let vars_pos = argv.iter().position(|a| *a == "--vars").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(argv[vars_pos + 1]).unwrap();
    assert_eq!(parsed, json!({"x": 1}));
}

#[tokio::test]
async fn docs_generate_passes_both_tokens() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::echo_stub(&dir);

    let config = DbtConfig::builder()
        .dbt_bin(stub.to_str().unwrap())
        .verbose(false)
        .build();
    let task = DbtTask::docs_generate(config);

    let outcome = task.execute().await.unwrap();

    assert_eq!(outcome.output().unwrap().stdout.trim(), "docs generate");
}

#[tokio::test]
async fn env_vars_overlay_the_process_environment() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::stub_dbt(&dir, "#!/bin/sh\necho \"$DBT_TASKS_PROBE\"\n");

    let config = DbtConfig::builder()
        .dbt_bin(stub.to_str().unwrap())
        .verbose(false)
        .env("DBT_TASKS_PROBE", "from_task")
        .build();
    let task = DbtTask::run(config);

    let outcome = task.execute().await.unwrap();

    assert_eq!(outcome.output().unwrap().stdout.trim(), "from_task");
}

#[tokio::test]
async fn working_directory_is_honored() {
    common::init_tracing();
    let bin_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let stub = common::stub_dbt(&bin_dir, "#!/bin/sh\npwd\n");

    let config = DbtConfig::builder()
        .dbt_bin(stub.to_str().unwrap())
        .verbose(false)
        .dir(work_dir.path())
        .build();
    let task = DbtTask::run(config);

    let outcome = task.execute().await.unwrap();

    let reported = outcome.output().unwrap().stdout.trim().to_string();
    let expected = work_dir.path().canonicalize().unwrap();
    assert_eq!(
        std::path::Path::new(&reported).canonicalize().unwrap(),
        expected
    );
}

#[tokio::test]
async fn nonzero_exit_code_is_observable() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::failing_stub(&dir, 42);

    let config = DbtConfig::builder()
        .dbt_bin(stub.to_str().unwrap())
        .build();
    let task = DbtTask::test(config);

    let err = task.execute().await.unwrap_err();

    match err {
        TaskError::CommandFailed { code, stderr } => {
            assert_eq!(code, 42);
            assert!(stderr.contains("Database Error"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn every_subcommand_launches_its_fixed_tokens() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let stub = common::echo_stub(&dir);

    for command in DbtCommand::ALL {
        let config = DbtConfig::builder()
            .dbt_bin(stub.to_str().unwrap())
            .verbose(false)
            .build();
        let task = DbtTask::new(command, config);

        let outcome = task.execute().await.unwrap();

        assert_eq!(
            outcome.output().unwrap().stdout.trim(),
            command.to_string(),
            "wrong tokens for {command}"
        );
    }
}
