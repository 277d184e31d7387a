//! Shared test utilities for the ccdb workspace.
//!
//! Dev-dependency only. [`TestProject`] builds a temporary CMake-style
//! project tree with presets, `.clangd` and settings files.

use std::fs;
use std::path::{Path, PathBuf};

use ccdb_fs::NormalizedPath;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use ccdb_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_presets(&[
///     ("base", serde_json::json!({"hidden": true, "binaryDir": "${sourceDir}/out/${presetName}"})),
///     ("dev", serde_json::json!({"inherits": "base"})),
/// ]);
/// project.assert_file_exists("CMakePresets.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory with a `CMakeLists.txt`.
    pub fn new() -> Self {
        let project = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        project.write("CMakeLists.txt", "cmake_minimum_required(VERSION 3.20)\nproject(demo)\n");
        project
    }

    /// Root path as given by the OS temp dir.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root path with symlinks resolved, as the marker search reports it.
    pub fn canonical_root(&self) -> NormalizedPath {
        NormalizedPath::new(dunce::canonicalize(self.root()).unwrap())
    }

    /// Write `content` to `path` (relative to root), creating parents.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Create a directory (relative to root) and return its path.
    pub fn mkdir(&self, path: &str) -> PathBuf {
        let full_path = self.root().join(path);
        fs::create_dir_all(&full_path).unwrap();
        full_path
    }

    /// Write `CMakePresets.json` with the given `(name, fields)` presets.
    pub fn write_presets(&self, presets: &[(&str, Value)]) -> PathBuf {
        self.write("CMakePresets.json", &presets_document(presets))
    }

    /// Write `CMakeUserPresets.json` with the given `(name, fields)` presets.
    pub fn write_user_presets(&self, presets: &[(&str, Value)]) -> PathBuf {
        self.write("CMakeUserPresets.json", &presets_document(presets))
    }

    pub fn write_clangd(&self, content: &str) -> PathBuf {
        self.write(".clangd", content)
    }

    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}

/// Build a presets document from `(name, fields)` pairs.
pub fn presets_document(presets: &[(&str, Value)]) -> String {
    let entries: Vec<Value> = presets
        .iter()
        .map(|(name, fields)| {
            let mut entry = fields.clone();
            if !entry.is_object() {
                entry = json!({});
            }
            entry["name"] = json!(name);
            entry
        })
        .collect();
    let document = json!({ "version": 6, "configurePresets": entries });
    serde_json::to_string_pretty(&document).unwrap()
}
