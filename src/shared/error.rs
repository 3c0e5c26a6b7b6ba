//! Settings Error Types
//!
//! Centralized error handling for settings loading.

use std::path::PathBuf;

use crate::config::Provider;

/// Settings error type
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Missing credential: {} is not set", .0.env_var())]
    MissingCredential(Provider),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

/// Result alias used throughout the crate
pub type Result<T, E = SettingsError> = std::result::Result<T, E>;
