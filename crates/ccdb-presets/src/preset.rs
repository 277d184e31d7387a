//! Preset records and preset-file loading
//!
//! Only the fields needed to find a binary directory are understood:
//! `name`, `hidden`, `binaryDir` and `inherits`. Everything else in the
//! presets file is ignored.

use ccdb_fs::{Marker, NormalizedPath, config};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// One entry of `configurePresets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,

    /// Hidden presets are only reachable through `inherits`.
    #[serde(default)]
    pub hidden: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_dir: Option<String>,

    /// Parent preset names, in precedence order. The file may give a single
    /// string or a list.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub inherits: Vec<String>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
            binary_dir: None,
            inherits: Vec::new(),
        }
    }

    pub fn with_binary_dir(mut self, binary_dir: impl Into<String>) -> Self {
        self.binary_dir = Some(binary_dir.into());
        self
    }

    /// Add a parent to inherit from.
    pub fn inheriting(mut self, parent: impl Into<String>) -> Self {
        self.inherits.push(parent.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresetsFile {
    #[serde(default)]
    configure_presets: Vec<Preset>,
}

/// All presets loaded for one project, in declaration order.
///
/// Hidden presets are kept so that inheritance can reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetSet {
    presets: Vec<Preset>,
}

impl PresetSet {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Parse the `configurePresets` list out of a presets document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: PresetsFile = serde_json::from_str(json).map_err(|e| Error::InvalidPresets {
            message: e.to_string(),
        })?;
        Ok(Self::new(file.configure_presets))
    }

    /// Load a single presets file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let file: PresetsFile = config::load(path)?;
        tracing::debug!(%path, count = file.configure_presets.len(), "Loaded presets");
        Ok(Self::new(file.configure_presets))
    }

    /// Load the presets of the project rooted at `root`.
    ///
    /// `CMakePresets.json` comes first, followed by `CMakeUserPresets.json`
    /// so user presets can inherit from project presets. Either file may be
    /// missing; with neither the set is empty.
    pub fn load_project(root: &NormalizedPath) -> Result<Self> {
        let mut presets = Vec::new();
        for marker in [Marker::CMakePresets, Marker::CMakeUserPresets] {
            let path = root.join(marker.as_str());
            if let Some(file) = config::load_optional::<PresetsFile>(&path)? {
                tracing::debug!(%path, count = file.configure_presets.len(), "Loaded presets");
                presets.extend(file.configure_presets);
            }
        }
        Ok(Self::new(presets))
    }

    /// Look up a preset by name, hidden or not. The first declaration wins.
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Presets offered for selection.
    pub fn visible(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter().filter(|p| !p.hidden)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl FromIterator<Preset> for PresetSet {
    fn from_iter<I: IntoIterator<Item = Preset>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_known_fields_and_ignores_the_rest() {
        let json = r#"{
            "version": 6,
            "cmakeMinimumRequired": {"major": 3, "minor": 23},
            "configurePresets": [
                {"name": "base", "hidden": true, "generator": "Ninja",
                 "binaryDir": "${sourceDir}/out/${presetName}",
                 "cacheVariables": {"CMAKE_BUILD_TYPE": "Debug"}},
                {"name": "dev", "inherits": "base"},
                {"name": "ci", "inherits": ["dev", "base"], "displayName": "CI"}
            ],
            "buildPresets": [{"name": "dev", "configurePreset": "dev"}]
        }"#;

        let set = PresetSet::from_json_str(json).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(
            set.find("base"),
            Some(&Preset::new("base").hidden().with_binary_dir("${sourceDir}/out/${presetName}"))
        );
        assert_eq!(set.find("dev"), Some(&Preset::new("dev").inheriting("base")));
        assert_eq!(
            set.find("ci").map(|p| p.inherits.clone()),
            Some(vec!["dev".to_string(), "base".to_string()])
        );
    }

    #[test]
    fn test_missing_configure_presets_is_empty() {
        let set = PresetSet::from_json_str(r#"{"version": 3}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_visible_skips_hidden_in_order() {
        let set: PresetSet = [
            Preset::new("base").hidden(),
            Preset::new("release"),
            Preset::new("debug"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = set.visible().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["release", "debug"]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = PresetSet::from_json_str("{\"configurePresets\": [{}]}").unwrap_err();
        assert!(matches!(err, Error::InvalidPresets { .. }));
    }
}
