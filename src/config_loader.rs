use crate::config::Config;
use crate::utils::validation::ValidationError;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Serialization formats understood by the loader and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl FromStr for Format {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Errors raised while reading or rendering a topology
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read topology file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid YAML topology: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON topology: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported topology format '{0}' (expected yaml or json)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Load a topology from a YAML or JSON file
///
/// The format follows the file extension. The topology is returned as
/// written, even if it breaks invariants; use [`load_and_validate`] to
/// reject those.
pub fn load_config(config_path: &Path) -> Result<Config, LoadError> {
    info!("Loading topology from: {:?}", config_path);

    let format = Format::from_path(config_path).ok_or_else(|| {
        LoadError::UnsupportedFormat(
            config_path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let content = fs::read_to_string(config_path).map_err(|source| LoadError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;

    parse_config(&content, format)
}

/// Parse a topology from an in-memory document
pub fn parse_config(content: &str, format: Format) -> Result<Config, LoadError> {
    let config: Config = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };

    if config.orderers.is_empty() {
        warn!("Topology declares no orderers");
    }

    Ok(config)
}

/// Load a topology and reject it if any invariant is violated
pub fn load_and_validate(config_path: &Path) -> Result<Config, LoadError> {
    let config = load_config(config_path)?;
    config.validate()?;
    info!(
        "Topology is valid: {} organizations, {} orderers, {} peers, {} channels",
        config.organizations.len(),
        config.orderers.len(),
        config.peers.len(),
        config.channels.len()
    );
    Ok(config)
}

/// Render a topology for downstream tooling
pub fn render(config: &Config, format: Format) -> Result<String, LoadError> {
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(config)?,
        Format::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(rendered)
}
