//! Error types for flakefall.
//!
//! The simulation itself never fails; only loading, saving and validating
//! configurations can.

use thiserror::Error;

/// Errors from reading, writing or validating a [`SimConfig`](crate::config::SimConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid config JSON.
    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside the range the simulation can work with.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No preset with this name.
    #[error("Unknown preset '{name}'. Available presets: {available}")]
    UnknownPreset { name: String, available: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
