//! Error types for assigner-core.

use std::path::PathBuf;

use thiserror::Error;

/// Rejections raised by [`Roster::add`](crate::Roster::add).
///
/// Both variants leave the roster unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A record with this username already exists and `force` was not set.
    #[error("user '{username}' is already in the roster")]
    DuplicateUser { username: String },

    /// A required field was empty.
    #[error("student {field} must not be empty")]
    EmptyField { field: &'static str },
}

/// All errors that can arise from config store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
