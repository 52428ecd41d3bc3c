//! Error types for assigner-import.

use std::path::PathBuf;

use thiserror::Error;

use assigner_core::RosterError;

/// Errors that abort a batch import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A required credential is not configured. Raised before any network call.
    #[error("missing {key} configuration")]
    MissingCredential { key: &'static str },

    /// A CSV row could not be turned into a student. Aborts the whole batch.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The roster rejected a record for a reason other than a duplicate.
    #[error("roster rejected record: {0}")]
    Roster(#[from] RosterError),

    /// CSV reader failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Canvas API request failed.
    #[error("Canvas request to {url} failed: {message}")]
    Http { url: String, message: String },
}

/// Errors from a secondary account lookup. Never fatal to an import.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The collaboration platform has no account for this username.
    #[error("no account found for '{username}'")]
    MissingSecondaryAccount { username: String },

    /// Lookup request failed.
    #[error("lookup request to {url} failed: {message}")]
    Http { url: String, message: String },
}

/// Convenience constructor for [`ImportError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ImportError {
    ImportError::Io {
        path: path.into(),
        source,
    }
}
