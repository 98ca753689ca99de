//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SecureResponseConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A settings value could not be coerced to the field's type.
    #[error("Invalid value for `{key}`: expected {expected}, got {found:?}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SecureResponseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SecureResponseConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
