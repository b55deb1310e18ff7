//! Application configuration model.
//!
//! Mirrors the layout of `config.toml`:
//!
//! ```toml
//! [completion]
//! model = "gpt-3.5-turbo"
//! temperature = 0.7
//! timeout_secs = 60
//!
//! [[persona]]
//! id = "編集者"
//! instruction = "あなたは編集者です。"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::persona::{Persona, PersonaRegistry};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 10_000;

/// Inclusive bounds accepted for sampling temperature.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Extra personas appended after the built-in ones
    #[serde(rename = "persona", default, skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<Persona>,
}

impl ConfigRoot {
    /// Builds the persona registry for this configuration.
    pub fn persona_registry(&self) -> Result<PersonaRegistry> {
        PersonaRegistry::with_extra(self.personas.clone())
    }
}

/// Raw `[completion]` table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CompletionConfig {
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub base_url: String,
    /// 0 disables retrying
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    /// Upper bound on any single wait, including a server `Retry-After`
    pub retry_max_delay_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 0,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        }
    }
}

impl CompletionConfig {
    /// Validates the table into client settings.
    pub fn settings(&self) -> Result<CompletionSettings> {
        if self.model.trim().is_empty() {
            return Err(AdvisorError::config("completion.model must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AdvisorError::config(
                "completion.timeout_secs must be greater than zero",
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(AdvisorError::config("completion.base_url must not be empty"));
        }

        Ok(CompletionSettings {
            model: self.model.clone(),
            temperature: Temperature::new(self.temperature)?,
            timeout: Duration::from_secs(self.timeout_secs),
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retry policy, or `None` when retrying is disabled.
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        (self.max_retries > 0).then(|| RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        })
    }
}

/// Sampling temperature within [`TEMPERATURE_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(f32);

impl Temperature {
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() || !TEMPERATURE_RANGE.contains(&value) {
            return Err(AdvisorError::config(format!(
                "temperature {value} is outside {}..={}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(DEFAULT_TEMPERATURE)
    }
}

/// Validated settings fixed when a completion client is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: Temperature,
    pub timeout: Duration,
    /// Base URL without trailing slash
    pub base_url: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Temperature::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Opt-in retry behaviour for transient completion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Cap applied to every wait
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based): `base_delay * 2^attempt`,
    /// capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// Wait before retry number `attempt`: the server's `Retry-After` when
    /// given, otherwise the backoff, never longer than `max_delay`.
    pub fn delay_for(&self, retry_after: Option<Duration>, attempt: u32) -> Duration {
        retry_after
            .map(|delay| delay.min(self.max_delay))
            .unwrap_or_else(|| self.backoff(attempt))
    }
}
