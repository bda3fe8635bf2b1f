//! Configuration and catalog errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a `SimConfig` or `WeaponCatalog`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("weapon catalog is empty")]
    EmptyCatalog,
    #[error("weapon `{name}`: {reason}")]
    InvalidWeapon { name: String, reason: &'static str },
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}
