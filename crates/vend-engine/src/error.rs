//! # Engine Error Types
//!
//! Sale, restock and cash errors live in `vend-core`. This file holds the
//! errors that only exist because the engine reads configuration.

use thiserror::Error;
use vend_core::{CashError, ValidationError};

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Machine configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration is well-formed but makes no sense.
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or written.
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No path given and no platform config directory available.
    #[error("No config path available")]
    NoConfigPath,

    /// A configured value failed validation.
    #[error("Invalid value in config: {0}")]
    Validation(#[from] ValidationError),

    /// A float entry uses a denomination the register does not take.
    #[error("Invalid float in config: {0}")]
    Cash(#[from] CashError),
}
