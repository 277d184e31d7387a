//! Binary directory resolution over the preset inheritance graph
//!
//! The chosen preset's `binaryDir` is found by walking `inherits`
//! depth-first, parents in declaration order, stopping at the first preset
//! that defines one. The names on the current walk path are tracked so a
//! repeat is reported as [`Error::CyclicInheritance`] instead of looping.

use std::collections::HashSet;

use ccdb_fs::with_trailing_separator;
use serde::Serialize;

use crate::{Error, PresetSet, Result};

/// Flag that makes the build tool emit `compile_commands.json`.
pub const EXPORT_COMPILE_COMMANDS_FLAG: &str = "-DCMAKE_EXPORT_COMPILE_COMMANDS=TRUE";

const SOURCE_DIR_TOKEN: &str = "${sourceDir}";
const PRESET_NAME_TOKEN: &str = "${presetName}";

/// Which preset, if any, the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelection {
    /// Configure without a preset; the default binary directory is used.
    NoPreset,
    Named(String),
}

impl PresetSelection {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::NoPreset => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for PresetSelection {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::NoPreset, Self::Named)
    }
}

/// Everything needed to configure one build tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub source_dir: String,
    pub binary_dir: String,
    pub extra_flags: Vec<String>,
}

impl ResolvedConfiguration {
    /// Arguments for the build tool, in invocation order.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.clone(),
            "-B".to_string(),
            self.binary_dir.clone(),
            EXPORT_COMPILE_COMMANDS_FLAG.to_string(),
        ];
        args.extend(self.extra_flags.iter().cloned());
        args
    }
}

/// Resolves binary directories against one [`PresetSet`].
#[derive(Debug, Clone, Copy)]
pub struct PresetResolver<'a> {
    presets: &'a PresetSet,
}

impl<'a> PresetResolver<'a> {
    pub fn new(presets: &'a PresetSet) -> Self {
        Self { presets }
    }

    /// Compute the configuration for `selection`.
    ///
    /// With [`PresetSelection::NoPreset`] the `default_binary_dir` is returned
    /// as given. Otherwise the preset's effective `binaryDir` (or the default
    /// when the chain has none) gets `${sourceDir}` and then `${presetName}`
    /// substituted and is normalized to one trailing separator.
    ///
    /// `extra_flags` are carried through unchanged; they are owned by the
    /// caller, which typically remembers the last flags used.
    ///
    /// # Errors
    ///
    /// - [`Error::PresetNotFound`] if the selected name is not in the set
    /// - [`Error::CyclicInheritance`] if the walk revisits a preset on its path
    pub fn resolve(
        &self,
        selection: &PresetSelection,
        project_root: &str,
        default_binary_dir: &str,
        extra_flags: &[String],
    ) -> Result<ResolvedConfiguration> {
        let source_dir = match trim_separators(project_root) {
            "" => project_root.to_string(),
            trimmed => trimmed.to_string(),
        };

        let binary_dir = match selection {
            PresetSelection::NoPreset => default_binary_dir.to_string(),
            PresetSelection::Named(name) => {
                let template = self
                    .binary_dir_template(name)?
                    .unwrap_or(default_binary_dir);
                with_trailing_separator(&substitute(template, project_root, name))
            }
        };

        tracing::debug!(
            preset = ?selection.name(),
            source_dir = %source_dir,
            binary_dir = %binary_dir,
            "Resolved configuration"
        );

        Ok(ResolvedConfiguration {
            source_dir,
            binary_dir,
            extra_flags: extra_flags.to_vec(),
        })
    }

    /// The unsubstituted `binaryDir` nearest to `name` in its inheritance
    /// graph, or `None` when no reachable preset defines one. A blank
    /// `binaryDir` counts as not defined.
    pub fn binary_dir_template(&self, name: &str) -> Result<Option<&'a str>> {
        if self.presets.find(name).is_none() {
            return Err(Error::PresetNotFound {
                name: name.to_string(),
            });
        }
        let mut walk = Walk::default();
        walk.nearest_binary_dir(self.presets, name)
    }
}

#[derive(Default)]
struct Walk<'a> {
    /// Names from the chosen preset down to the one being visited.
    path: Vec<&'a str>,
    /// Presets already fully explored without finding a `binaryDir`.
    exhausted: HashSet<&'a str>,
}

impl<'a> Walk<'a> {
    fn nearest_binary_dir(&mut self, presets: &'a PresetSet, name: &str) -> Result<Option<&'a str>> {
        if self.path.iter().any(|visited| *visited == name) {
            let mut chain: Vec<String> = self.path.iter().map(|n| n.to_string()).collect();
            chain.push(name.to_string());
            return Err(Error::CyclicInheritance { chain });
        }
        if self.exhausted.contains(name) {
            return Ok(None);
        }

        let Some(preset) = presets.find(name) else {
            tracing::debug!(preset = name, "Inherited preset not found, ending branch");
            return Ok(None);
        };

        match preset.binary_dir.as_deref() {
            Some(binary_dir) if !binary_dir.trim().is_empty() => {
                tracing::debug!(preset = name, binary_dir, "Found binaryDir");
                return Ok(Some(binary_dir));
            }
            Some(_) => tracing::debug!(preset = name, "Ignoring blank binaryDir"),
            None => {}
        }

        self.path.push(&preset.name);
        for parent in &preset.inherits {
            if let Some(binary_dir) = self.nearest_binary_dir(presets, parent)? {
                self.path.pop();
                return Ok(Some(binary_dir));
            }
        }
        self.path.pop();
        self.exhausted.insert(&preset.name);
        Ok(None)
    }
}

/// Replace `${sourceDir}` with `project_root` (trailing separators removed),
/// then `${presetName}` with `preset_name`.
///
/// The replacements are sequential. Other `${...}` tokens are left as they are.
pub fn substitute(template: &str, project_root: &str, preset_name: &str) -> String {
    template
        .replace(SOURCE_DIR_TOKEN, trim_separators(project_root))
        .replace(PRESET_NAME_TOKEN, preset_name)
}

fn trim_separators(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preset;

    fn flags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_preset_returns_default_unchanged() {
        let set = PresetSet::default();
        let resolved = PresetResolver::new(&set)
            .resolve(&PresetSelection::NoPreset, "/proj/", "/proj/build", &flags(&["-GNinja"]))
            .unwrap();

        assert_eq!(resolved.binary_dir, "/proj/build");
        assert_eq!(resolved.source_dir, "/proj");
        assert_eq!(resolved.extra_flags, flags(&["-GNinja"]));
    }

    #[test]
    fn test_substitution_order_and_unknown_tokens() {
        assert_eq!(
            substitute("${sourceDir}/out/${presetName}/${hostSystemName}", "/proj//", "dev"),
            "/proj/out/dev/${hostSystemName}"
        );
    }

    #[test]
    fn test_source_dir_replaced_before_preset_name() {
        // A root that itself contains the preset-name token is expanded by
        // the second pass.
        assert_eq!(
            substitute("${sourceDir}/b", "/p/${presetName}", "dev"),
            "/p/dev/b"
        );
    }

    #[test]
    fn test_chain_without_binary_dir_uses_default_with_substitution() {
        let set: PresetSet = [Preset::new("dev").inheriting("base"), Preset::new("base")]
            .into_iter()
            .collect();

        let resolved = PresetResolver::new(&set)
            .resolve(&PresetSelection::Named("dev".into()), "/proj", "${sourceDir}/build", &[])
            .unwrap();

        assert_eq!(resolved.binary_dir, "/proj/build/");
    }

    #[test]
    fn test_command_args_order() {
        let resolved = ResolvedConfiguration {
            source_dir: "/proj".into(),
            binary_dir: "/proj/out/dev/".into(),
            extra_flags: flags(&["-GNinja", "-DFOO=1"]),
        };

        assert_eq!(
            resolved.command_args(),
            flags(&[
                "-S",
                "/proj",
                "-B",
                "/proj/out/dev/",
                EXPORT_COMPILE_COMMANDS_FLAG,
                "-GNinja",
                "-DFOO=1",
            ])
        );
    }

    #[test]
    fn test_selection_from_option() {
        assert_eq!(PresetSelection::from(None), PresetSelection::NoPreset);
        assert_eq!(
            PresetSelection::from(Some("dev".to_string())).name(),
            Some("dev")
        );
    }
}
