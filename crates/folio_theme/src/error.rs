//! Theme runtime error types

use thiserror::Error;

/// Invalid input or an incomplete component table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown presentation variant: {0:?}")]
    UnknownVariant(String),

    #[error("unknown intensity level: {0:?}")]
    UnknownIntensity(String),

    /// A screen asked for a capability nobody implemented
    #[error("no capability registered under {0:?}")]
    MissingCapability(String),

    #[error("capability {0:?} is already registered")]
    DuplicateCapability(String),
}

/// Storage read/write failures
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Storage disabled or over quota
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored preferences are corrupt: {0}")]
    Corrupt(#[from] toml::de::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
