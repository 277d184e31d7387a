//! Well-known marker and config file names.

use std::path::Path;

/// Files whose presence identifies a project or configuration scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `CMakePresets.json`, the project's checked-in presets
    CMakePresets,
    /// `CMakeUserPresets.json`, per-user presets next to the project presets
    CMakeUserPresets,
    /// `.clangd`, the language-server configuration
    Clangd,
    /// `.ccdb.toml`, project-level settings for this tool
    ProjectSettings,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CMakePresets => "CMakePresets.json",
            Self::CMakeUserPresets => "CMakeUserPresets.json",
            Self::Clangd => ".clangd",
            Self::ProjectSettings => ".ccdb.toml",
        }
    }
}

impl AsRef<Path> for Marker {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for Marker {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
