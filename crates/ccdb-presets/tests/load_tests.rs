//! Loading presets from project files.

use ccdb_fs::{Error as FsError, NormalizedPath};
use ccdb_presets::{Error, PresetResolver, PresetSelection, PresetSet};
use ccdb_test_utils::TestProject;
use serde_json::json;

#[test]
fn test_load_project_reads_presets_file() {
    let project = TestProject::new();
    project.write_presets(&[
        ("base", json!({"hidden": true, "binaryDir": "${sourceDir}/out/${presetName}"})),
        ("dev", json!({"inherits": "base"})),
    ]);

    let set = PresetSet::load_project(&NormalizedPath::new(project.root())).unwrap();

    let visible: Vec<_> = set.visible().map(|p| p.name.clone()).collect();
    assert_eq!(visible, vec!["dev"]);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_user_presets_inherit_from_project_presets() {
    let project = TestProject::new();
    project.write_presets(&[(
        "base",
        json!({"hidden": true, "binaryDir": "${sourceDir}/out/${presetName}"}),
    )]);
    project.write_user_presets(&[("mine", json!({"inherits": ["base"]}))]);

    let root = NormalizedPath::new(project.root());
    let set = PresetSet::load_project(&root).unwrap();
    let resolved = PresetResolver::new(&set)
        .resolve(
            &PresetSelection::Named("mine".into()),
            root.as_str(),
            "build",
            &[],
        )
        .unwrap();

    assert_eq!(resolved.binary_dir, format!("{}/out/mine/", root.trim_trailing_separator()));
}

#[test]
fn test_project_without_presets_is_empty() {
    let project = TestProject::new();
    let set = PresetSet::load_project(&NormalizedPath::new(project.root())).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_malformed_presets_file_names_path() {
    let project = TestProject::new();
    let path = project.write("CMakePresets.json", "{ \"configurePresets\": [ ");

    let err = PresetSet::load_project(&NormalizedPath::new(project.root())).unwrap_err();

    match err {
        Error::Fs(FsError::ConfigParse { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}
