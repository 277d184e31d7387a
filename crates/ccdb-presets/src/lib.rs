//! Build preset loading and resolution for ccdb.
//!
//! Reads the `configurePresets` list of a CMake presets file, walks the
//! inheritance graph of a chosen preset to find its effective binary
//! directory, and computes the flags used to configure the build tree.

pub mod error;
pub mod preset;
pub mod resolver;

pub use error::{Error, Result};
pub use preset::{Preset, PresetSet};
pub use resolver::{
    EXPORT_COMPILE_COMMANDS_FLAG, PresetResolver, PresetSelection, ResolvedConfiguration,
    substitute,
};
