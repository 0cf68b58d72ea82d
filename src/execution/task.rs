//! The dbt task adapter.
//!
//! [`DbtTask`] binds one [`DbtCommand`] to a [`DbtConfig`] and exposes the
//! pair as a schedulable [`Task`]. Execution is two-state: a task either
//! skips (when the skip flag is set, before anything is launched) or runs
//! its subcommand to completion. Retries, timeouts, and ordering belong to
//! the orchestrator.

use async_trait::async_trait;
use tracing::info;

use crate::core::command::DbtCommand;
use crate::core::config::{DbtConfig, TaskOverrides};
use crate::core::task::{Task, TaskError, TaskOutcome};
use crate::execution::cli::DbtCli;

/// A pipeline step that runs one dbt subcommand.
///
/// # Example
///
/// ```no_run
/// use dbt_tasks::{DbtConfig, DbtTask, Task};
///
/// # async fn demo() -> Result<(), dbt_tasks::TaskError> {
/// let config = DbtConfig::builder()
///     .profiles_dir("/opt/dbt/profiles")
///     .target("prod")
///     .models("tag:nightly")
///     .build();
///
/// let task = DbtTask::run(config);
/// let outcome = task.execute().await?;
/// assert!(!outcome.is_skipped());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DbtTask {
    name: String,
    command: DbtCommand,
    config: DbtConfig,
}

impl DbtTask {
    /// Create a task for the given subcommand.
    ///
    /// The default name is derived from the subcommand (`dbt_run`,
    /// `dbt_docs_generate`, ...).
    pub fn new(command: DbtCommand, config: DbtConfig) -> Self {
        Self {
            name: format!("dbt_{}", command.tokens().join("_")),
            command,
            config,
        }
    }

    /// Replace the default task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `dbt run`
    pub fn run(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Run, config)
    }

    /// `dbt test`
    pub fn test(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Test, config)
    }

    /// `dbt seed`
    pub fn seed(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Seed, config)
    }

    /// `dbt snapshot`
    pub fn snapshot(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Snapshot, config)
    }

    /// `dbt deps`
    pub fn deps(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Deps, config)
    }

    /// `dbt clean`
    pub fn clean(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Clean, config)
    }

    /// `dbt build`
    pub fn build(config: DbtConfig) -> Self {
        Self::new(DbtCommand::Build, config)
    }

    /// `dbt docs generate`
    pub fn docs_generate(config: DbtConfig) -> Self {
        Self::new(DbtCommand::DocsGenerate, config)
    }

    /// The subcommand this task runs.
    pub fn command(&self) -> DbtCommand {
        self.command
    }

    /// The task configuration.
    pub fn config(&self) -> &DbtConfig {
        &self.config
    }

    /// Apply runtime overrides from the orchestrator.
    ///
    /// Must be called before [`execute`](Task::execute); the configuration
    /// is treated as immutable once the task runs.
    pub fn apply_overrides(&mut self, overrides: &TaskOverrides) {
        self.config.apply(overrides);
    }
}

#[async_trait]
impl Task for DbtTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> Result<TaskOutcome, TaskError> {
        if self.config.skip {
            info!(task = %self.name, command = %self.command, "skip flag set, not launching dbt");
            return Ok(TaskOutcome::Skipped);
        }

        // Each execution gets its own CLI wrapper; nothing is shared
        // across tasks beyond the copied environment.
        let cli = DbtCli::new(self.config.clone());
        let output = cli.run(self.command).await?;
        Ok(TaskOutcome::Executed(output))
    }

    fn description(&self) -> Option<&str> {
        Some(match self.command {
            DbtCommand::Run => "execute dbt models",
            DbtCommand::Test => "run dbt tests",
            DbtCommand::Seed => "load dbt seed files",
            DbtCommand::Snapshot => "execute dbt snapshots",
            DbtCommand::Deps => "install dbt package dependencies",
            DbtCommand::Clean => "clean dbt-managed directories",
            DbtCommand::Build => "run dbt build",
            DbtCommand::DocsGenerate => "generate dbt documentation",
        })
    }
}
