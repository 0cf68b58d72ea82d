//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a pipeline file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the pipeline file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the pipeline file as YAML.
    #[error("YAML parse error in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The pipeline parsed but is not usable.
    #[error("invalid pipeline: {0}")]
    InvalidPipeline(String),
}
