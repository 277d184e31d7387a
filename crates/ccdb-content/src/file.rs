//! A `.clangd` file on disk.

use ccdb_fs::{FileLock, NormalizedPath, RobustnessConfig, io};

use crate::{COMPILATION_DATABASE, Error, Patched, Result, SectionKey, get_value, set_value};

/// The language-server configuration file at a fixed path.
///
/// Each call reads the file fresh; writes replace the whole file atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangdFile {
    path: NormalizedPath,
    robustness: RobustnessConfig,
}

impl ClangdFile {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self {
            path: path.into(),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn with_robustness(mut self, robustness: RobustnessConfig) -> Self {
        self.robustness = robustness;
        self
    }

    /// The `.clangd` file inside `dir`.
    pub fn in_dir(dir: &NormalizedPath) -> Self {
        Self::new(dir.join(ccdb_fs::Marker::Clangd.as_str()))
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// The stored compilation database directory.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the file exists but has no such entry; an
    /// I/O error if the file cannot be read.
    pub fn compilation_database(&self) -> Result<String> {
        self.get(COMPILATION_DATABASE)
    }

    /// Point the compilation database at `dir`.
    pub fn set_compilation_database(&self, dir: &str) -> Result<Patched> {
        self.set(COMPILATION_DATABASE, dir)
    }

    pub fn get(&self, target: SectionKey<'_>) -> Result<String> {
        let text = io::read_text(&self.path)?;
        get_value(&text, target).ok_or_else(|| Error::KeyNotFound {
            key: format!("{}.{}", target.section, target.key),
            path: self.path.to_native(),
        })
    }

    /// Set a key, creating the file if needed.
    ///
    /// The read, patch and write happen under an exclusive [`FileLock`], so
    /// concurrent writers cannot lose each other's edits. The file is left
    /// untouched when the value is already current.
    pub fn set(&self, target: SectionKey<'_>, value: &str) -> Result<Patched> {
        let _lock = FileLock::acquire(&self.path, self.robustness)?;
        let existing = io::read_optional_text(&self.path)?;
        let patched = set_value(existing.as_deref(), target, value)?;
        if patched.is_changed() {
            io::write_atomic(&self.path, patched.text.as_bytes(), self.robustness)?;
            tracing::info!(path = %self.path, action = ?patched.action, "Updated config");
        } else {
            tracing::debug!(path = %self.path, "Config already up to date");
        }
        Ok(patched)
    }
}
