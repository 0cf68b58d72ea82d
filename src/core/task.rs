//! Task trait, outcomes, and error types.
//!
//! The `Task` trait is the boundary between this crate and the workflow
//! orchestrator: one schedulable unit per pipeline step. A task resolves to
//! either an executed outcome carrying the captured subprocess output, or a
//! skipped outcome signalling that the step intentionally did no work.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while building or running a dbt invocation.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The dbt executable could not be launched (not found, not executable).
    #[error("failed to launch dbt: {0}")]
    ExecutionFailed(String),

    /// dbt ran but exited with a non-zero status.
    #[error("dbt exited with code {code}")]
    CommandFailed {
        /// Exit code reported by the subprocess (-1 if killed by a signal).
        code: i32,
        /// Captured stderr, for diagnostics.
        stderr: String,
    },

    /// The task configuration could not be turned into an argument vector.
    #[error("invalid task configuration: {0}")]
    InvalidConfig(String),
}

impl TaskError {
    /// The subprocess exit code, if this error carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskError::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Captured output of a completed dbt invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Everything the subprocess wrote to stdout.
    pub stdout: String,
    /// Everything the subprocess wrote to stderr.
    pub stderr: String,
    /// Exit code (always 0 for outputs returned on the success path).
    pub exit_code: i32,
}

/// Terminal state of a task run.
///
/// `Skipped` is a deliberate non-error outcome: the task was configured to
/// skip and no subprocess was launched. Orchestrators should mark the step
/// as skipped rather than failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The subprocess ran to completion with exit code 0.
    Executed(CommandOutput),
    /// The skip flag was set; nothing was launched.
    Skipped,
}

impl TaskOutcome {
    /// True if the task skipped without launching anything.
    pub fn is_skipped(&self) -> bool {
        matches!(self, TaskOutcome::Skipped)
    }

    /// The captured output, if the task actually executed.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            TaskOutcome::Executed(output) => Some(output),
            TaskOutcome::Skipped => None,
        }
    }
}

/// A schedulable unit of work.
///
/// # Example
///
/// ```ignore
/// use dbt_tasks::{Task, TaskError, TaskOutcome};
/// use async_trait::async_trait;
///
/// struct NoopTask;
///
/// #[async_trait]
/// impl Task for NoopTask {
///     fn name(&self) -> &str {
///         "noop"
///     }
///
///     async fn execute(&self) -> Result<TaskOutcome, TaskError> {
///         Ok(TaskOutcome::Skipped)
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// Returns the unique name/identifier for this task.
    fn name(&self) -> &str;

    /// Execute the task, blocking until the underlying work finishes.
    ///
    /// # Returns
    /// * `Ok(TaskOutcome::Executed(_))` - subprocess ran and exited 0
    /// * `Ok(TaskOutcome::Skipped)` - skip flag set, nothing launched
    /// * `Err(TaskError)` - launch failure or non-zero exit
    async fn execute(&self) -> Result<TaskOutcome, TaskError>;

    /// Optional description for display/logging purposes.
    fn description(&self) -> Option<&str> {
        None
    }
}
