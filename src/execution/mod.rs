//! Execution layer: the CLI command builder and the task adapter.

pub mod cli;
pub mod task;

pub use cli::DbtCli;
pub use task::DbtTask;
