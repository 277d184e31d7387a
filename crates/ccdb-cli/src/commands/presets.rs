//! The presets command: list selectable presets and where they build

use std::path::Path;

use ccdb_presets::{PresetResolver, PresetSelection, PresetSet};
use colored::Colorize;
use serde::Serialize;

use crate::commands::open_project;
use crate::error::Result;
use crate::settings::SettingsResolver;

/// One selectable preset. A preset whose inheritance cannot be resolved is
/// still listed, with the reason in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetRow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn list_presets(cwd: &Path, resolver: &SettingsResolver) -> Result<Vec<PresetRow>> {
    let project = open_project(cwd, resolver, None)?;
    let presets = PresetSet::load_project(&project.root)?;
    let default_binary_dir = project.settings.default_binary_dir(&project.root);
    let preset_resolver = PresetResolver::new(&presets);

    let rows = presets
        .visible()
        .map(|preset| {
            let selection = PresetSelection::Named(preset.name.clone());
            match preset_resolver.resolve(&selection, project.root.as_str(), &default_binary_dir, &[]) {
                Ok(resolved) => PresetRow {
                    name: preset.name.clone(),
                    binary_dir: Some(resolved.binary_dir),
                    error: None,
                },
                Err(e) => PresetRow {
                    name: preset.name.clone(),
                    binary_dir: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();
    Ok(rows)
}

pub fn run_presets(cwd: &Path, resolver: &SettingsResolver, json: bool) -> Result<()> {
    let rows = list_presets(cwd, resolver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", "No selectable presets".dimmed());
        return Ok(());
    }

    for row in &rows {
        match (&row.binary_dir, &row.error) {
            (Some(dir), _) => println!("  {} {} {}", row.name.bold(), "->".dimmed(), dir),
            (None, Some(error)) => println!("  {} {}", row.name.bold(), error.red()),
            (None, None) => println!("  {}", row.name.bold()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccdb_test_utils::TestProject;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_lists_visible_presets_with_binary_dirs() {
        let project = TestProject::new();
        project.write_presets(&[
            ("base", json!({"hidden": true, "binaryDir": "${sourceDir}/out/${presetName}"})),
            ("dev", json!({"inherits": "base"})),
            ("plain", json!({})),
            ("loop", json!({"inherits": "loop"})),
        ]);
        let global = TempDir::new().unwrap();
        let resolver = SettingsResolver::with_global_config_dir(global.path());

        let rows = list_presets(project.root(), &resolver).unwrap();
        let root = project.canonical_root();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].binary_dir, Some(format!("{}/out/dev/", root)));
        assert_eq!(rows[1].binary_dir, Some(format!("{}/build/", root)));
        assert_eq!(rows[2].name, "loop");
        assert!(rows[2].error.as_deref().unwrap().contains("loop -> loop"));
    }
}
