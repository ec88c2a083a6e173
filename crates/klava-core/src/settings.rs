// Klava Settings Module
// Persists the locale preference across sessions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::Locale;

/// Persisted preferences. A single flag today: the active locale.
///
/// Stored as a TOML document (default: `<config_dir>/klava/settings.toml`)
/// and written back whenever the locale is toggled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub locale: Locale,
}

/// Errors that can occur when loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML encode error: {0}")]
    TomlEncode(String),
}

impl Settings {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))
    }

    /// Render the settings document.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::TomlEncode(e.to_string()))
    }

    /// Write the document atomically: temp file in place, then rename.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let temp = path.with_extension("toml.tmp");
        std::fs::write(&temp, self.to_toml()?)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }

    /// The default settings path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("klava").join("settings.toml"))
    }
}
