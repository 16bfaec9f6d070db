//! Catalog loading from JSON data files, plus TOML settings helpers

mod data;
mod settings;

pub use data::{Catalog, BUILTIN_FILES};
pub use settings::Settings;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog or settings loading error
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Catalog validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, CatalogError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Parse a JSON document, naming `file` in any error
pub fn parse_json<T: serde::de::DeserializeOwned>(file: &str, content: &str) -> Result<T, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::JsonError {
        file: file.to_string(),
        source,
    })
}
