//! File formats.
//!
//! Simulation inputs are read from JSON or TOML, chosen by file extension.
//! Outputs and meshes are JSON.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use weft_types::{WeftError, WeftResult};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> WeftResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(WeftError::Serialization(format!(
                "Unsupported file format: {} (use .json or .toml)",
                path.display()
            ))),
        }
    }

    /// Parses `text` in this format.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> WeftResult<T> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|e| WeftError::Serialization(e.to_string())),
            Self::Toml => toml::from_str(text).map_err(|e| WeftError::Serialization(e.to_string())),
        }
    }

    /// Renders `value` in this format.
    pub fn render<T: Serialize>(self, value: &T) -> WeftResult<String> {
        match self {
            Self::Json => {
                serde_json::to_string_pretty(value).map_err(|e| WeftError::Serialization(e.to_string()))
            }
            Self::Toml => toml::to_string(value).map_err(|e| WeftError::Serialization(e.to_string())),
        }
    }
}

/// Reads and parses a document, picking the format from the extension.
pub fn read_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> WeftResult<T> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path)?;
    format.parse(&text)
}

/// Renders and writes a document, picking the format from the extension.
pub fn write_document<T: Serialize>(path: impl AsRef<Path>, value: &T) -> WeftResult<()> {
    let path = path.as_ref();
    let text = Format::from_path(path)?.render(value)?;
    fs::write(path, text)?;
    Ok(())
}
