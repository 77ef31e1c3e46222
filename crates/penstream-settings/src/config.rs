//! Configuration file handling.
//!
//! Supports JSON and TOML files stored in the platform config directory.
//! Sections:
//! - Plotter identity (the `$I` fingerprint to scan for)
//! - File defaults (output directory for G-code artifacts)
//! - Interpreter (executable that runs the streaming engine)

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Plotter identity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotterSettings {
    /// Text to identify the connected plotter with, matched against the
    /// `$I` probe response. "DrawCore" for iDraw boards, "DRAWBOT" for
    /// DrawBot.
    pub identifier: String,
}

impl Default for PlotterSettings {
    fn default() -> Self {
        Self {
            identifier: "DrawCore".to_string(),
        }
    }
}

/// File handling defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSettings {
    /// Directory where G-code artifacts are saved.
    pub output_directory: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        let base = dirs::document_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            output_directory: base.join("penstream"),
        }
    }
}

/// Streaming engine interpreter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterSettings {
    /// Location of the Python 3.11+ executable.
    pub path: PathBuf,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        #[cfg(target_os = "windows")]
        let path = PathBuf::from("python.exe");
        #[cfg(not(target_os = "windows"))]
        let path = PathBuf::from("python3");

        Self { path }
    }
}

/// Complete operator configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Plotter identity
    pub plotter: PlotterSettings,
    /// File handling defaults
    pub files: FileSettings,
    /// Streaming engine interpreter
    pub interpreter: InterpreterSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ));
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.plotter.identifier.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "plotter.identifier".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.files.output_directory.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "files.output_directory".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.interpreter.path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "interpreter.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Default config file location under the platform config directory.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".to_string()))?;
    Ok(base.join("penstream").join("config.toml"))
}
