//! Error types for ccdb-presets

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ccdb_fs::Error),

    #[error("Preset not found: {name}")]
    PresetNotFound { name: String },

    /// `chain` runs from the chosen preset to the name that repeated.
    #[error("Cyclic preset inheritance: {}", .chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },

    #[error("Invalid presets document: {message}")]
    InvalidPresets { message: String },
}
