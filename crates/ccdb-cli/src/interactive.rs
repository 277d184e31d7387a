//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection and input.

use ccdb_presets::{PresetSelection, PresetSet};
use dialoguer::{Input, Select};

use crate::error::Result;

const NO_PRESET_LABEL: &str = "(no preset)";

/// Ask which preset to configure with.
///
/// Lists selectable presets in declaration order followed by a
/// "no preset" entry.
pub fn select_preset(presets: &PresetSet) -> Result<PresetSelection> {
    let mut items: Vec<String> = presets.visible().map(|p| p.name.clone()).collect();
    items.push(NO_PRESET_LABEL.to_string());

    let index = Select::new()
        .with_prompt("Configure preset")
        .items(&items)
        .default(0)
        .interact()?;

    if index + 1 == items.len() {
        Ok(PresetSelection::NoPreset)
    } else {
        Ok(PresetSelection::Named(items[index].clone()))
    }
}

/// Ask for extra build-tool flags, offering `default` as the answer.
pub fn prompt_extra_flags(default: &[String]) -> Result<Vec<String>> {
    let answer: String = Input::new()
        .with_prompt("Extra flags")
        .default(default.join(" "))
        .allow_empty(true)
        .interact_text()?;
    Ok(split_flags(&answer))
}

fn split_flags(answer: &str) -> Vec<String> {
    answer.split_whitespace().map(String::from).collect()
}
