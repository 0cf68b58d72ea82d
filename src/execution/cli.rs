//! dbt CLI invocation: argument vector construction and subprocess launch.
//!
//! [`DbtCli`] turns a [`DbtConfig`] plus a [`DbtCommand`] into one concrete
//! command line and runs it. Inclusion policy: optional fields become flags
//! only when set and non-empty, boolean fields only when true, and the
//! `vars` map is serialized to a JSON object string for `--vars`. The
//! global `--warn-error` flag precedes the subcommand tokens.

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::core::command::DbtCommand;
use crate::core::config::DbtConfig;
use crate::core::task::{CommandOutput, TaskError};

/// Selection fields are whitespace-split so each selector lands in its own
/// argv slot; no shell is involved in the launch.
fn push_selection(args: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.trim().is_empty() {
            args.push(flag.to_string());
            args.extend(value.split_whitespace().map(String::from));
        }
    }
}

/// Builds dbt command lines and launches them as subprocesses.
///
/// One instance is created per task execution; it owns its configuration
/// and shares nothing.
#[derive(Debug, Clone)]
pub struct DbtCli {
    config: DbtConfig,
}

impl DbtCli {
    /// Create a new CLI wrapper around the given configuration.
    pub fn new(config: DbtConfig) -> Self {
        Self { config }
    }

    /// The configuration this wrapper was created with.
    pub fn config(&self) -> &DbtConfig {
        &self.config
    }

    /// Construct the argument vector for the given subcommand.
    ///
    /// The executable name itself is not part of the result; these are the
    /// arguments passed after `dbt_bin`.
    pub fn build_args(&self, command: DbtCommand) -> Result<Vec<String>, TaskError> {
        let cfg = &self.config;
        let mut args: Vec<String> = Vec::new();

        // Global flag, must precede the subcommand.
        if cfg.warn_error {
            args.push("--warn-error".to_string());
        }

        args.extend(command.tokens().iter().map(|t| t.to_string()));

        if let Some(profiles_dir) = &cfg.profiles_dir {
            args.push("--profiles-dir".to_string());
            args.push(profiles_dir.clone());
        }
        if let Some(target) = &cfg.target {
            args.push("--target".to_string());
            args.push(target.clone());
        }
        if !cfg.vars.is_empty() {
            let vars = serde_json::to_string(&cfg.vars).map_err(|e| {
                TaskError::InvalidConfig(format!("failed to serialize vars: {e}"))
            })?;
            args.push("--vars".to_string());
            args.push(vars);
        }
        if cfg.full_refresh {
            args.push("--full-refresh".to_string());
        }
        if cfg.data {
            args.push("--data".to_string());
        }
        if cfg.schema {
            args.push("--schema".to_string());
        }

        push_selection(&mut args, "--models", cfg.models.as_deref());
        push_selection(&mut args, "--exclude", cfg.exclude.as_deref());
        push_selection(&mut args, "--select", cfg.select.as_deref());
        if let Some(selector) = &cfg.selector {
            if !selector.trim().is_empty() {
                args.push("--selector".to_string());
                args.push(selector.clone());
            }
        }

        Ok(args)
    }

    /// Run the given subcommand, blocking until the subprocess exits.
    ///
    /// The subprocess inherits this process's environment overlaid with the
    /// configured `env_vars`, runs in the configured working directory, and
    /// has stdout/stderr captured. Captured output is forwarded to the log
    /// at info level when `verbose` is set, debug otherwise. A non-zero
    /// exit status is propagated as [`TaskError::CommandFailed`] with the
    /// exit code intact.
    pub async fn run(&self, command: DbtCommand) -> Result<CommandOutput, TaskError> {
        let cfg = &self.config;
        let args = self.build_args(command)?;

        info!(
            command = %command,
            "launching: {} {}",
            cfg.dbt_bin,
            args.join(" ")
        );

        let mut cmd = Command::new(&cfg.dbt_bin);
        cmd.args(&args);
        cmd.envs(&cfg.env_vars);
        if let Some(dir) = &cfg.dir {
            cmd.current_dir(dir);
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| {
            TaskError::ExecutionFailed(format!("could not launch '{}': {e}", cfg.dbt_bin))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        for line in stdout.lines() {
            if cfg.verbose {
                info!(command = %command, "{line}");
            } else {
                debug!(command = %command, "{line}");
            }
        }

        let exit_code = output.status.code().unwrap_or(-1);
        if output.status.success() {
            Ok(CommandOutput {
                stdout,
                stderr,
                exit_code,
            })
        } else {
            for line in stderr.lines() {
                warn!(command = %command, "{line}");
            }
            Err(TaskError::CommandFailed {
                code: exit_code,
                stderr,
            })
        }
    }
}
