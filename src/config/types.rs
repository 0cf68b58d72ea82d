//! Pipeline configuration types.
//!
//! A pipeline file declares a list of dbt steps plus shared defaults:
//!
//! ```yaml
//! name: nightly
//! defaults:
//!   profiles_dir: /opt/dbt/profiles
//!   target: prod
//!   env_vars:
//!     DBT_ENV_SECRET_PASSWORD: "{{ secret }}"
//! steps:
//!   - name: install_packages
//!     command: deps
//!   - name: nightly_models
//!     command: run
//!     models: "tag:nightly"
//!     full_refresh: true
//!   - command: docs-generate
//! ```
//!
//! Step fields take precedence over defaults; default environment variables
//! are merged underneath step-level ones.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::command::DbtCommand;
use crate::core::config::DbtConfig;
use crate::execution::task::DbtTask;

/// Values shared by every step unless the step sets its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    /// Default `--profiles-dir`.
    pub profiles_dir: Option<String>,
    /// Default `--target`.
    pub target: Option<String>,
    /// Default working directory.
    pub dir: Option<PathBuf>,
    /// Default dbt executable. Applies to steps that use the stock
    /// `"dbt"` binary name.
    pub dbt_bin: Option<String>,
    /// Environment variables merged underneath step-level ones.
    pub env_vars: HashMap<String, String>,
}

/// One step of a pipeline file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Step name; defaults to the subcommand-derived task name.
    pub name: Option<String>,
    /// Which dbt subcommand to run.
    pub command: DbtCommand,
    /// Invocation configuration; omitted fields fall back to defaults.
    #[serde(flatten)]
    pub config: DbtConfig,
}

/// A pipeline file: shared defaults plus an ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Optional pipeline name, for display.
    pub name: Option<String>,
    /// Values applied to steps that do not set their own.
    pub defaults: PipelineDefaults,
    /// The steps, in declaration order.
    pub steps: Vec<StepConfig>,
}

impl PipelineConfig {
    /// Materialize the steps as executable tasks, applying defaults.
    pub fn into_tasks(self) -> Vec<DbtTask> {
        let defaults = self.defaults;
        self.steps
            .into_iter()
            .map(|step| {
                let mut config = step.config;
                if config.profiles_dir.is_none() {
                    config.profiles_dir = defaults.profiles_dir.clone();
                }
                if config.target.is_none() {
                    config.target = defaults.target.clone();
                }
                if config.dir.is_none() {
                    config.dir = defaults.dir.clone();
                }
                if config.dbt_bin == "dbt" {
                    if let Some(bin) = &defaults.dbt_bin {
                        config.dbt_bin = bin.clone();
                    }
                }
                // Defaults first so step-level entries win.
                if !defaults.env_vars.is_empty() {
                    let mut merged = defaults.env_vars.clone();
                    merged.extend(config.env_vars);
                    config.env_vars = merged;
                }

                let task = DbtTask::new(step.command, config);
                match step.name {
                    Some(name) => task.with_name(name),
                    None => task,
                }
            })
            .collect()
    }
}
