/// Application settings
///
/// Settings live in a small JSON file in the user's config directory:
/// - Linux: ~/.config/shot-on-what/settings.json
/// - macOS: ~/Library/Application Support/shot-on-what/settings.json
/// - Windows: %APPDATA%\shot-on-what\settings.json
///
/// Every field has a default, so a missing file (or a partial one) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable overriding the asset directory
pub const ASSET_DIR_ENV: &str = "SHOT_ON_WHAT_ASSETS";

/// How long the reveal feedback stays up before the round advances
const DEFAULT_REVEAL_DELAY_MS: u64 = 1500;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory the photo files are resolved against
    pub asset_dir: PathBuf,
    /// Explicit catalog file; when unset the asset directory is searched
    pub catalog_file: Option<PathBuf>,
    /// Reveal feedback duration in milliseconds
    pub reveal_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            catalog_file: None,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

impl Settings {
    /// Load settings from the default location, applying the env override.
    ///
    /// Falls back to defaults (with a warning) if the file is unreadable.
    pub fn load() -> Self {
        let mut settings = match Self::settings_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("⚠️  {e}, using default settings");
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Some(dir) = std::env::var_os(ASSET_DIR_ENV) {
            settings.asset_dir = PathBuf::from(dir);
        }

        settings
    }

    /// Parse a settings file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Where the settings file is expected to be
    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("shot-on-what");
        path.push("settings.json");
        Some(path)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = Settings::from_json(r#"{ "asset_dir": "/photos" }"#).unwrap();

        assert_eq!(settings.asset_dir, PathBuf::from("/photos"));
        assert_eq!(settings.catalog_file, None);
        assert_eq!(settings.reveal_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_malformed_settings_are_an_error() {
        let result = Settings::from_json("{ asset_dir: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::from_file(&dir.path().join("settings.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
