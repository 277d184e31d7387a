//! Format-aware loading of structured files
//!
//! Format is detected from the file extension:
//! - `.toml` -> TOML
//! - `.json` -> JSON

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Load and deserialize a structured file.
pub fn load<T: DeserializeOwned>(path: &NormalizedPath) -> Result<T> {
    let content = io::read_text(path)?;
    parse(path, &content)
}

/// Load a structured file, returning `None` when it does not exist.
///
/// A file that exists but fails to parse is still an error.
pub fn load_optional<T: DeserializeOwned>(path: &NormalizedPath) -> Result<Option<T>> {
    match io::read_optional_text(path)? {
        Some(content) => parse(path, &content).map(Some),
        None => {
            tracing::debug!(%path, "Config file absent, skipping");
            Ok(None)
        }
    }
}

fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
    let extension = path.extension().unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
