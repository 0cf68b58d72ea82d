//! dbt task adapters for workflow orchestrators.
//!
//! This crate maps dbt subcommands (`run`, `test`, `seed`, `snapshot`,
//! `deps`, `clean`, `build`, `docs generate`) to schedulable pipeline
//! tasks. At execution time a task builds an argument vector from its
//! declarative [`DbtConfig`] and launches the dbt CLI as a subprocess,
//! surfacing the exit status back to the orchestrator. A task whose skip
//! flag is set resolves to [`TaskOutcome::Skipped`] without launching
//! anything.
//!
//! # Quick Start
//!
//! ```no_run
//! use dbt_tasks::{DbtConfig, DbtTask, Task};
//!
//! # async fn demo() -> Result<(), dbt_tasks::TaskError> {
//! let config = DbtConfig::builder()
//!     .profiles_dir("/opt/dbt/profiles")
//!     .target("prod")
//!     .models("tag:nightly")
//!     .var("run_date", "2024-01-01")
//!     .build();
//!
//! let task = DbtTask::run(config);
//! match task.execute().await? {
//!     outcome if outcome.is_skipped() => println!("step skipped"),
//!     outcome => println!("dbt exited {}", outcome.output().unwrap().exit_code),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Pipelines can also be declared in YAML and materialized with
//! [`load_pipeline`] and [`PipelineConfig::into_tasks`].

pub mod config;
pub mod core;
pub mod execution;

pub use config::{load_pipeline, ConfigError, PipelineConfig, PipelineDefaults, StepConfig};
pub use core::command::{DbtCommand, ParseCommandError};
pub use core::config::{DbtConfig, DbtConfigBuilder, TaskOverrides};
pub use core::task::{CommandOutput, Task, TaskError, TaskOutcome};
pub use execution::cli::DbtCli;
pub use execution::task::DbtTask;
