//! Config file storage.
//!
//! Reads `config.toml` into the [`ConfigRoot`] domain model. The file is
//! optional: a missing or empty file yields the defaults.

use std::fs;
use std::path::PathBuf;

use advisor_core::AdvisorError;
use advisor_core::config::ConfigRoot;

use crate::paths::{AdvisorPaths, PathError};

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

impl From<ConfigStorageError> for AdvisorError {
    fn from(e: ConfigStorageError) -> Self {
        AdvisorError::config(e.to_string())
    }
}

/// Read-only access to `config.toml`.
///
/// Responsibilities:
/// - Locate the config file (default path or `ADVISOR_CONFIG`)
/// - Parse TOML into `ConfigRoot`
///
/// Does NOT:
/// - Write or create the config file
/// - Validate values (done by `CompletionConfig::settings` and `PersonaRegistry::new`)
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage handle for an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the configuration from the default location.
    ///
    /// When no config directory can be determined (and `ADVISOR_CONFIG` is
    /// unset) the defaults are used instead of failing startup.
    pub fn load_default() -> Result<ConfigRoot, ConfigStorageError> {
        Self::load_resolved(AdvisorPaths::config_file())
    }

    fn load_resolved(path: Result<PathBuf, PathError>) -> Result<ConfigRoot, ConfigStorageError> {
        match path {
            Ok(path) => Self::with_path(path).load(),
            Err(e) => {
                tracing::warn!("{}, using default configuration", e);
                Ok(ConfigRoot::default())
            }
        }
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// absent or empty.
    pub fn load(&self) -> Result<ConfigRoot, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Config file not found, using defaults");
            return Ok(ConfigRoot::default());
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(ConfigRoot::default());
        }

        let config: ConfigRoot = toml::from_str(&content)?;
        tracing::info!(
            path = %self.path.display(),
            extra_personas = config.personas.len(),
            "Loaded config file"
        );
        Ok(config)
    }
}
