//! Credential resolution.
//!
//! The API key comes from the process environment, optionally seeded from a
//! `.env` file in the working directory. A missing key is not a startup error;
//! the completion client reports it on the first request.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the completion service API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the configured model.
pub const MODEL_NAME_ENV: &str = "OPENAI_MODEL_NAME";

/// Result of seeding the environment from a `.env` file.
///
/// Loading happens before the tracing subscriber exists, so the outcome is
/// returned and logged by the caller once logging is up.
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

impl DotenvOutcome {
    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
            Self::NotFound => tracing::debug!("No .env file found"),
            Self::Failed(err) => tracing::warn!("Failed to load .env file: {}", err),
        }
    }
}

/// Loads `.env` from the working directory (or a parent) into the process
/// environment.
///
/// Variables already set are left untouched. A missing file is not an error.
pub fn load_dotenv() -> DotenvOutcome {
    DotenvOutcome::from_result(dotenvy::dotenv())
}

/// Loads a specific `.env` file; same rules as [`load_dotenv`].
pub fn load_dotenv_from(path: &Path) -> DotenvOutcome {
    DotenvOutcome::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

/// API key that never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Reads the key from `OPENAI_API_KEY`.
    pub fn from_env() -> Option<Self> {
        Self::from_value(env::var(API_KEY_ENV).ok())
    }

    /// Wraps a raw value; blank values count as absent.
    pub fn from_value(value: Option<String>) -> Option<Self> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Model override from `OPENAI_MODEL_NAME`, if set and non-blank.
pub fn model_override() -> Option<String> {
    env::var(MODEL_NAME_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_absent() {
        assert!(ApiKey::from_value(None).is_none());
        assert!(ApiKey::from_value(Some(String::new())).is_none());
        assert!(ApiKey::from_value(Some("   ".to_string())).is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let key = ApiKey::from_value(Some(" sk-test\n".to_string())).unwrap();
        assert_eq!(key.expose(), "sk-test");
    }

    #[test]
    fn test_missing_dotenv_is_not_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let outcome = load_dotenv_from(&temp_dir.path().join(".env"));
        assert!(matches!(outcome, DotenvOutcome::NotFound));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = ApiKey::from_value(Some("sk-secret".to_string())).unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
