/// Error types for the application
///
/// Asset errors are recovered by the game state machine (the pair is dropped
/// from the active set). Catalog and config errors fall back to defaults at
/// startup, so none of these are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file reference into a displayable image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Neither the raw name nor the percent-encoded name could be read
    #[error("image not found: {0}")]
    NotFound(String),

    /// The file was read but is not an image we can decode
    #[error("image {file} is not decodable: {reason}")]
    Undecodable { file: String, reason: String },
}

impl AssetError {
    /// The catalog file reference that caused the failure
    pub fn file(&self) -> &str {
        match self {
            AssetError::NotFound(file) => file,
            AssetError::Undecodable { file, .. } => file,
        }
    }
}

/// Failure to build a pair catalog from an external source
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure to load the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}
