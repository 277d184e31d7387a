//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::{Error, NormalizedPath, Result};

/// Knobs for [`FileLock`] and [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the exclusive lock before giving up.
    pub lock_timeout: Duration,
    /// Flush file contents to disk before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// An exclusive advisory lock guarding read-modify-write of a file.
///
/// The lock is taken on a sidecar `<file>.lock` next to the target, since the
/// target itself is replaced by rename on every write. Released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Lock `target`, retrying with exponential backoff for up to
    /// `config.lock_timeout`.
    ///
    /// # Errors
    ///
    /// [`Error::LockFailed`] if another holder keeps the lock past the timeout.
    pub fn acquire(target: &NormalizedPath, config: RobustnessConfig) -> Result<Self> {
        let path = PathBuf::from(format!("{}.lock", target.trim_trailing_separator()));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        let policy = ExponentialBackoff {
            max_elapsed_time: Some(config.lock_timeout),
            ..ExponentialBackoff::default()
        };
        backoff::retry(policy, || {
            file.try_lock_exclusive().map_err(|e| {
                tracing::debug!(lock = %path.display(), "Lock busy, retrying");
                backoff::Error::transient(e)
            })
        })
        .map_err(|_| Error::LockFailed {
            path: target.to_native(),
        })?;

        tracing::debug!(lock = %path.display(), "Acquired lock");
        Ok(Self { file, path })
    }

    /// The sidecar lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Write content atomically to a file.
///
/// The content goes to a temporary file in the target's directory (same
/// filesystem), which is flushed and renamed over the target. Readers see
/// either the old file or the new one, never a partial write. An existing
/// target keeps its permissions; a new one gets the usual umask-based mode.
/// The temporary file is removed on every error path.
///
/// Callers doing read-modify-write hold a [`FileLock`] around the whole
/// sequence.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    let parent = match native_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().map_err(|e| Error::io(&native_path, e))?,
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    let mut temp = new_temp_in(&parent).map_err(|e| Error::io(&parent, e))?;

    match fs::metadata(&native_path) {
        Ok(metadata) => temp
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::io(temp.path(), e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(&native_path, e)),
    }

    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;

    if config.enable_fsync {
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(temp.path(), e))?;
    }

    temp.persist(&native_path)
        .map_err(|e| Error::io(&native_path, e.error))?;

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// A temp file created with the same mode `fs::write` would use.
#[cfg(unix)]
fn new_temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, mapping a missing file to `None`.
pub fn read_optional_text(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Write text content to a file atomically with default robustness.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
