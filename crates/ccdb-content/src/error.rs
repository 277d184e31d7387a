//! Error types for ccdb-content

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ccdb_fs::Error),

    #[error("No {key} entry in {path}")]
    KeyNotFound { key: String, path: PathBuf },

    /// Values must fit on one line with no surrounding whitespace.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
