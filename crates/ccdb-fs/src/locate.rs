//! Upward marker search
//!
//! Ascends from a starting directory until a directory containing the marker
//! is found. The filesystem root is detected by the parent of the current
//! directory being equal to itself, so there is no depth limit.
//!
//! Symlinked directories are resolved once up front by canonicalizing the
//! start; there is no further loop protection beyond the root check.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result};

/// Find the nearest directory at or above `start` that directly contains
/// `marker`.
///
/// A marker counts as present when it can be opened for reading.
///
/// # Errors
///
/// - [`Error::Io`] if `start` cannot be resolved to an absolute path
/// - [`Error::MarkerNotFound`] once the filesystem root has been checked
pub fn locate(marker: &str, start: impl AsRef<Path>) -> Result<NormalizedPath> {
    let start = start.as_ref();
    let mut current = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;

    loop {
        let candidate = current.join(marker);
        if is_readable(&candidate) {
            tracing::debug!(marker, dir = %current.display(), "Found marker");
            return Ok(NormalizedPath::new(&current));
        }

        let parent = parent_or_self(&current);
        if parent == current {
            tracing::debug!(marker, start = %start.display(), "Reached filesystem root");
            return Err(Error::MarkerNotFound {
                marker: marker.to_string(),
                start: start.to_path_buf(),
            });
        }
        current = parent;
    }
}

/// Like [`locate`], but "not found" is `Ok(None)` instead of an error.
pub fn locate_optional(marker: &str, start: impl AsRef<Path>) -> Result<Option<NormalizedPath>> {
    match locate(marker, start) {
        Ok(dir) => Ok(Some(dir)),
        Err(e) if e.is_marker_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn parent_or_self(dir: &Path) -> PathBuf {
    dir.parent().unwrap_or(dir).to_path_buf()
}

fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}
