//! Carousel error types
//!
//! Runtime operations never fail; these only cover loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a config file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for a carousel
    #[error("Invalid carousel config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("Failed to serialize carousel config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but holds an unusable value
    #[error("Invalid carousel config: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
