//! Layered settings for ccdb
//!
//! Settings are merged from, in order:
//! 1. Built-in defaults
//! 2. Global config (`<config_dir>/ccdb/config.toml`)
//! 3. Project config (`<project root>/.ccdb.toml`)
//!
//! Later layers override earlier ones field by field. Command-line flags
//! are applied on top by the commands themselves.

use std::path::{Path, PathBuf};

use ccdb_fs::{Marker, NormalizedPath, config};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Effective settings after all layers are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// File identifying the project root during upward search
    pub project_marker: String,
    /// Name of the language-server config file
    pub clangd_file: String,
    /// Build directory when no preset supplies one, relative to the root
    pub default_build_dir: String,
    /// Build tool executable
    pub cmake_program: String,
    /// Initial extra flags for the first configure of a session
    pub extra_flags: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_marker: Marker::CMakePresets.as_str().to_string(),
            clangd_file: Marker::Clangd.as_str().to_string(),
            default_build_dir: "build".to_string(),
            cmake_program: "cmake".to_string(),
            extra_flags: Vec::new(),
        }
    }
}

impl Settings {
    fn merge(&mut self, layer: SettingsLayer) {
        if let Some(v) = layer.project_marker {
            self.project_marker = v;
        }
        if let Some(v) = layer.clangd_file {
            self.clangd_file = v;
        }
        if let Some(v) = layer.default_build_dir {
            self.default_build_dir = v;
        }
        if let Some(v) = layer.cmake_program {
            self.cmake_program = v;
        }
        if let Some(v) = layer.extra_flags {
            self.extra_flags = v;
        }
    }

    /// The default build directory for `root`, ending in one separator.
    pub fn default_binary_dir(&self, root: &NormalizedPath) -> String {
        if Path::new(&self.default_build_dir).is_absolute() {
            NormalizedPath::new(&self.default_build_dir).as_dir_string()
        } else {
            root.join(&self.default_build_dir).as_dir_string()
        }
    }
}

/// One settings file; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsLayer {
    project_marker: Option<String>,
    clangd_file: Option<String>,
    default_build_dir: Option<String>,
    cmake_program: Option<String>,
    extra_flags: Option<Vec<String>>,
}

/// Loads and merges settings layers.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    /// Override for the global config directory (tests and `--config-dir`).
    /// When `None`, `dirs::config_dir()/ccdb` is used.
    global_config_dir_override: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_config_dir(global_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir_override: Some(global_config_dir.into()),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("ccdb"))
    }

    /// Resolve settings, including the project layer when `project_root`
    /// is known. Missing files are skipped; invalid TOML is an error.
    pub fn resolve(&self, project_root: Option<&NormalizedPath>) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(global_dir) = self.global_config_dir() {
            let path = NormalizedPath::new(global_dir.join("config.toml"));
            if let Some(layer) = config::load_optional::<SettingsLayer>(&path)? {
                tracing::debug!(%path, "Loaded global settings");
                settings.merge(layer);
            }
        }

        if let Some(root) = project_root {
            let path = root.join(Marker::ProjectSettings.as_str());
            if let Some(layer) = config::load_optional::<SettingsLayer>(&path)? {
                tracing::debug!(%path, "Loaded project settings");
                settings.merge(layer);
            }
        }

        Ok(settings)
    }
}
