//! Error types for ccdb-fs

use std::path::PathBuf;

/// Result type for ccdb-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ccdb-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find {marker} in {start} or any parent directory")]
    MarkerNotFound { marker: String, start: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when this is an upward search that ran out of parents.
    pub fn is_marker_not_found(&self) -> bool {
        matches!(self, Self::MarkerNotFound { .. })
    }
}
