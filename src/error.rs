//! Error types for outguard
//!
//! The decision core is total and never fails. Errors only come from the
//! edges: reading snapshot documents, loading configuration, and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for outguard operations
pub type OutguardResult<T> = Result<T, OutguardError>;

/// All errors that can occur in outguard
#[derive(Error, Debug)]
pub enum OutguardError {
    // Snapshot document errors
    #[error("Invalid snapshot document {path}: {reason}")]
    SnapshotInvalid { path: PathBuf, reason: String },

    #[error("Snapshot document not found: {0}")]
    SnapshotNotFound(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Policy errors (only raised when the caller asks for strict mode)
    #[error("Overlapping outputs: output property '{property}' with path '{path}'")]
    OverlapDetected { property: String, path: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl OutguardError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a snapshot document error
    pub fn snapshot_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SnapshotInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SnapshotNotFound(_) => {
                Some("Check the path; omit --previous for a task's first execution")
            }
            Self::SnapshotInvalid { .. } => {
                Some("Regular files need a hex \"hash\"; kinds are file, directory, missing")
            }
            Self::OverlapDetected { .. } => {
                Some("Another task or process writes into this output location")
            }
            Self::ConfigInvalid { .. } => Some("Fix or remove the file named above"),
            _ => None,
        }
    }
}
