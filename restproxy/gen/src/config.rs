//! Loading proxy definitions from disk.
//!
//! Definitions are TOML (`.toml`) or JSON (`.json`) files in the shape of
//! [`ProxyDefinition`]:
//!
//! ```toml
//! name = "UserService"
//! root_path = "/api"
//!
//! [[methods]]
//! name = "get_user"
//! method = "GET"
//! path = "/users/{id}"
//! returns = "User"
//! params = [{ name = "id", ty = "u64" }]
//! path_params = { id = "id" }
//! ```

use std::fs;
use std::path::Path;

use restproxy_define::ProxyDefinition;
use tracing::debug;

use crate::errors::GeneratorError;

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    /// Picks the format from the file extension (case-insensitive).
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(GeneratorError::ConfigError(format!(
                "unsupported definition file '{}': expected a .toml or .json extension",
                path.display()
            ))),
        }
    }
}

/// Reads a proxy definition from `path`.
///
/// ## Errors
///
/// - `GeneratorError::ConfigError` if the extension is not supported
/// - `GeneratorError::ReadError` if the file cannot be read
/// - `GeneratorError::ParseError` if the content does not describe a proxy
pub fn load_definition(path: &Path) -> Result<ProxyDefinition, GeneratorError> {
    let format = DefinitionFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let definition = parse_definition(&content, format).map_err(|reason| GeneratorError::ParseError {
        path: path.display().to_string(),
        reason,
    })?;

    debug!(
        path = %path.display(),
        proxy = %definition.name,
        methods = definition.methods.len(),
        "loaded proxy definition"
    );
    Ok(definition)
}

/// Parses definition text in the given format.
///
/// The error is the parser's message.
pub fn parse_definition(content: &str, format: DefinitionFormat) -> Result<ProxyDefinition, String> {
    match format {
        DefinitionFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        DefinitionFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}
