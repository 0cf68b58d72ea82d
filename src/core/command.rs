//! The set of supported dbt subcommands.
//!
//! Each variant maps to a fixed token sequence on the dbt command line.
//! A single task type parameterized by this enum replaces one adapter type
//! per subcommand; all other configuration handling is shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A dbt subcommand that can be scheduled as a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DbtCommand {
    /// `dbt run` - execute compiled models against the warehouse.
    Run,
    /// `dbt test` - run data and schema tests.
    Test,
    /// `dbt seed` - load CSV seed files.
    Seed,
    /// `dbt snapshot` - execute snapshot definitions.
    Snapshot,
    /// `dbt deps` - install package dependencies.
    Deps,
    /// `dbt clean` - delete dbt-managed directories.
    Clean,
    /// `dbt build` - run, test, seed, and snapshot in DAG order.
    Build,
    /// `dbt docs generate` - build the documentation catalog.
    DocsGenerate,
}

impl DbtCommand {
    /// All supported subcommands.
    pub const ALL: [DbtCommand; 8] = [
        DbtCommand::Run,
        DbtCommand::Test,
        DbtCommand::Seed,
        DbtCommand::Snapshot,
        DbtCommand::Deps,
        DbtCommand::Clean,
        DbtCommand::Build,
        DbtCommand::DocsGenerate,
    ];

    /// The fixed argv tokens for this subcommand.
    ///
    /// All subcommands are a single token except docs generation, which is
    /// the two-token sequence `docs generate`.
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            DbtCommand::Run => &["run"],
            DbtCommand::Test => &["test"],
            DbtCommand::Seed => &["seed"],
            DbtCommand::Snapshot => &["snapshot"],
            DbtCommand::Deps => &["deps"],
            DbtCommand::Clean => &["clean"],
            DbtCommand::Build => &["build"],
            DbtCommand::DocsGenerate => &["docs", "generate"],
        }
    }
}

impl fmt::Display for DbtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

/// Error returned when a string does not name a supported subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dbt command: '{0}'")]
pub struct ParseCommandError(String);

impl FromStr for DbtCommand {
    type Err = ParseCommandError;

    /// Parse a subcommand name. Accepts `docs generate`, `docs-generate`,
    /// and `docs_generate` spellings; matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "run" => Ok(DbtCommand::Run),
            "test" => Ok(DbtCommand::Test),
            "seed" => Ok(DbtCommand::Seed),
            "snapshot" => Ok(DbtCommand::Snapshot),
            "deps" => Ok(DbtCommand::Deps),
            "clean" => Ok(DbtCommand::Clean),
            "build" => Ok(DbtCommand::Build),
            "docs-generate" => Ok(DbtCommand::DocsGenerate),
            _ => Err(ParseCommandError(s.to_string())),
        }
    }
}
