//! Command implementations for ccdb-cli

pub mod configure;
pub mod presets;
pub mod show;

use std::path::Path;

use ccdb_fs::NormalizedPath;

use crate::error::{CliError, Result};
use crate::settings::{Settings, SettingsResolver};

pub use configure::{ConfigureOptions, run_configure};
pub use presets::run_presets;
pub use show::run_show;

/// A project root with its effective settings.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: NormalizedPath,
    pub settings: Settings,
}

/// Find the project for `cwd`.
///
/// An explicit `source_dir` (relative to `cwd`) wins; otherwise the nearest
/// directory containing the configured project marker is used. Either way
/// the root is canonical.
pub fn open_project(
    cwd: &Path,
    resolver: &SettingsResolver,
    source_dir: Option<&Path>,
) -> Result<Project> {
    let global = resolver.resolve(None)?;

    let root = match source_dir {
        Some(dir) => {
            let dir = cwd.join(dir);
            match dunce::canonicalize(&dir) {
                Ok(canonical) if canonical.is_dir() => NormalizedPath::new(canonical),
                _ => {
                    return Err(CliError::user(format!(
                        "Source directory does not exist: {}",
                        dir.display()
                    )));
                }
            }
        }
        None => ccdb_fs::locate(&global.project_marker, cwd)?,
    };
    tracing::debug!(root = %root, "Using project root");

    let settings = resolver.resolve(Some(&root))?;
    Ok(Project { root, settings })
}
