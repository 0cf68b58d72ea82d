//! Pipeline file loading.
//!
//! Pipelines are declared in YAML; see [`types`] for the schema. The loader
//! reads, parses, and validates a file in one step.

mod error;
mod types;

pub use error::ConfigError;
pub use types::{PipelineConfig, PipelineDefaults, StepConfig};

use std::collections::HashSet;
use std::path::Path;

/// Load and validate a pipeline file.
pub fn load_pipeline(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let pipeline: PipelineConfig =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&pipeline)?;
    Ok(pipeline)
}

/// Reject pipelines that parsed but cannot be scheduled.
fn validate(pipeline: &PipelineConfig) -> Result<(), ConfigError> {
    if pipeline.steps.is_empty() {
        return Err(ConfigError::InvalidPipeline(
            "pipeline has no steps".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for step in &pipeline.steps {
        if let Some(name) = &step.name {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidPipeline(format!(
                    "duplicate step name: '{name}'"
                )));
            }
        }
    }

    Ok(())
}
