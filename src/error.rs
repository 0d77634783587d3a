//! Errors for loading settings, rosters and input scripts
//!
//! The simulation itself never fails; only the data feeding it can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::Invalid(msg.into())
    }
}

/// Read a whole file, tagging IO failures with the path
pub fn read_to_string(path: impl Into<PathBuf>) -> Result<String, ConfigError> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
}
