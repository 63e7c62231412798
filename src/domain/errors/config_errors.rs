use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating the host configuration map
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown configuration keys: {}", .keys.join(", "))]
    UnknownKeys { keys: Vec<String> },

    #[error("region is empty")]
    MissingRegion,

    #[error("could not parse {key} (expected bool): invalid value {value:?}")]
    InvalidBoolean { key: &'static str, value: String },
}

/// The credentials override file was named but could not be loaded
#[derive(Debug, Error)]
#[error("error loading environment from {env} ({})", .path.display())]
pub struct CredentialLoadError {
    pub env: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
