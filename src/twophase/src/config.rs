//! Solver and table settings, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read the configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not write the configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Limits and preferences for a single solve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// No solution longer than this is returned.
    pub max_length: u8,
    /// Deepest phase one search before giving up.
    pub phase1_max_depth: u8,
    /// Deepest phase two search for any single phase one solution.
    pub phase2_max_depth: u8,
    /// When set, keep looking for shorter solutions until one is at most
    /// this long or no shorter one can be found.
    pub target_length: Option<u8>,
    /// Merge adjacent turns of the same face in the final solution.
    pub coalesce: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_length: 30,
            phase1_max_depth: 12,
            phase2_max_depth: 18,
            target_length: None,
            coalesce: true,
        }
    }
}

/// How pruning tables are generated and cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Worker threads for table generation. All cores when unset.
    pub threads: Option<usize>,
    /// Stop the breadth-first search at this depth.
    pub max_depth: Option<u8>,
    /// Where tables are cached between runs. The platform cache directory
    /// when unset.
    pub cache_dir: Option<PathBuf>,
}

impl TableConfig {
    /// The directory tables are cached in, if any can be determined.
    #[must_use]
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("twophase-tables")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub solver: SolverConfig,
    pub tables: TableConfig,
}

impl Config {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown fields.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Render as TOML that [`Config::from_toml`] reads back unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has no TOML representation.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}
