//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or shape error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is present but unusable.
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
