//! Declarative configuration for a dbt invocation.
//!
//! [`DbtConfig`] is a bag of optional fields mirroring the dbt CLI surface.
//! It is built once when the pipeline graph is assembled and consumed to
//! produce exactly one argument vector per run. [`TaskOverrides`] is the
//! subset an orchestrator may substitute at runtime, applied before the
//! task executes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Configuration for one dbt invocation.
///
/// Every field maps to a CLI flag, the working directory, or the executable
/// itself. Omitted fields produce no flags. `verbose` defaults to true and
/// `dbt_bin` to `"dbt"`; everything else defaults to absent/false.
///
/// # Example
///
/// ```
/// use dbt_tasks::DbtConfig;
///
/// let config = DbtConfig::builder()
///     .profiles_dir("/opt/dbt/profiles")
///     .target("prod")
///     .models("tag:nightly")
///     .var("run_date", "2024-01-01")
///     .full_refresh(true)
///     .build();
///
/// assert_eq!(config.target.as_deref(), Some("prod"));
/// assert!(config.full_refresh);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbtConfig {
    /// Extra environment variables for the subprocess, overlaid on the
    /// inherited process environment.
    pub env_vars: HashMap<String, String>,
    /// Passed as `--profiles-dir` when set.
    pub profiles_dir: Option<String>,
    /// Passed as `--target` when set.
    pub target: Option<String>,
    /// Working directory to run the CLI in. Defaults to the current
    /// directory when unset.
    pub dir: Option<PathBuf>,
    /// Serialized to JSON and passed as `--vars` when non-empty.
    pub vars: BTreeMap<String, Value>,
    /// Whitespace-separated selection, passed as `--models` when set.
    pub models: Option<String>,
    /// Whitespace-separated selection, passed as `--exclude` when set.
    pub exclude: Option<String>,
    /// Whitespace-separated selection, passed as `--select` when set.
    pub select: Option<String>,
    /// Named selector from selectors.yml, passed as `--selector` when set.
    pub selector: Option<String>,
    /// The dbt executable name or path. Defaults to `"dbt"`.
    pub dbt_bin: String,
    /// Forward captured dbt output to the log at info level.
    pub verbose: bool,
    /// Fully refresh incremental models (`--full-refresh`).
    pub full_refresh: bool,
    /// Treat warnings as errors (global `--warn-error` flag).
    pub warn_error: bool,
    /// Run data tests only (`--data`).
    pub data: bool,
    /// Run schema tests only (`--schema`).
    pub schema: bool,
    /// Skip this step entirely: no subprocess is launched and the task
    /// reports a skipped outcome.
    pub skip: bool,
}

impl Default for DbtConfig {
    fn default() -> Self {
        Self {
            env_vars: HashMap::new(),
            profiles_dir: None,
            target: None,
            dir: None,
            vars: BTreeMap::new(),
            models: None,
            exclude: None,
            select: None,
            selector: None,
            dbt_bin: "dbt".to_string(),
            verbose: true,
            full_refresh: false,
            warn_error: false,
            data: false,
            schema: false,
            skip: false,
        }
    }
}

impl DbtConfig {
    /// Create a new builder with default values.
    pub fn builder() -> DbtConfigBuilder {
        DbtConfigBuilder::new()
    }

    /// Apply runtime overrides from the orchestrator.
    ///
    /// Maps are merged with override entries winning; the boolean fields
    /// are replaced only when the override carries a value.
    pub fn apply(&mut self, overrides: &TaskOverrides) {
        for (key, value) in &overrides.env_vars {
            self.env_vars.insert(key.clone(), value.clone());
        }
        for (key, value) in &overrides.vars {
            self.vars.insert(key.clone(), value.clone());
        }
        if let Some(skip) = overrides.skip {
            self.skip = skip;
        }
        if let Some(full_refresh) = overrides.full_refresh {
            self.full_refresh = full_refresh;
        }
    }
}

/// The template-substitutable subset of [`DbtConfig`].
///
/// Orchestrators that parameterize steps at trigger time (per-run variables,
/// conditional skips, forced full refreshes) deserialize this and apply it
/// via [`DbtConfig::apply`] before execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskOverrides {
    /// Extra environment variables, merged over the configured ones.
    pub env_vars: HashMap<String, String>,
    /// Extra `--vars` entries, merged over the configured ones.
    pub vars: BTreeMap<String, Value>,
    /// Replace the skip flag when present.
    pub skip: Option<bool>,
    /// Replace the full-refresh flag when present.
    pub full_refresh: Option<bool>,
}

/// Builder for creating [`DbtConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct DbtConfigBuilder {
    config: DbtConfig,
}

impl DbtConfigBuilder {
    /// Create a builder starting from default values.
    pub fn new() -> Self {
        Self {
            config: DbtConfig::default(),
        }
    }

    /// Add a single environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.env_vars.insert(key.into(), value.into());
        self
    }

    /// Add multiple environment variables.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config
            .env_vars
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the profiles directory (`--profiles-dir`).
    pub fn profiles_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.profiles_dir = Some(dir.into());
        self
    }

    /// Set the target profile (`--target`).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.config.target = Some(target.into());
        self
    }

    /// Set the working directory to run the CLI in.
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.dir = Some(dir.into());
        self
    }

    /// Add a single `--vars` entry.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.vars.insert(key.into(), value.into());
        self
    }

    /// Add multiple `--vars` entries.
    pub fn vars<I, K>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.config
            .vars
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Set the model selection (`--models`).
    pub fn models(mut self, models: impl Into<String>) -> Self {
        self.config.models = Some(models.into());
        self
    }

    /// Set the exclusion selection (`--exclude`).
    pub fn exclude(mut self, exclude: impl Into<String>) -> Self {
        self.config.exclude = Some(exclude.into());
        self
    }

    /// Set the node selection (`--select`).
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.config.select = Some(select.into());
        self
    }

    /// Set the named selector (`--selector`).
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selector = Some(selector.into());
        self
    }

    /// Set the dbt executable name or path.
    pub fn dbt_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.dbt_bin = bin.into();
        self
    }

    /// Control output forwarding verbosity.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Fully refresh incremental models.
    pub fn full_refresh(mut self, full_refresh: bool) -> Self {
        self.config.full_refresh = full_refresh;
        self
    }

    /// Treat warnings as errors.
    pub fn warn_error(mut self, warn_error: bool) -> Self {
        self.config.warn_error = warn_error;
        self
    }

    /// Run data tests only.
    pub fn data(mut self, data: bool) -> Self {
        self.config.data = data;
        self
    }

    /// Run schema tests only.
    pub fn schema(mut self, schema: bool) -> Self {
        self.config.schema = schema;
        self
    }

    /// Mark the step to be skipped at execution time.
    pub fn skip(mut self, skip: bool) -> Self {
        self.config.skip = skip;
        self
    }

    /// Build the `DbtConfig`.
    pub fn build(self) -> DbtConfig {
        self.config
    }
}
