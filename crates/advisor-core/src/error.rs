//! Error types for the advisor application.

use std::time::Duration;
use thiserror::Error;

/// A shared error type for the entire advisor application.
///
/// Every variant is recoverable: the interaction shell reports it and returns
/// to the prompt. Only successful exchanges ever reach the transcript.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// The submitted text was empty after trimming; no request was made.
    #[error("Input is empty: please enter a question")]
    EmptyInput,

    /// The requested persona id is not registered.
    #[error("Unknown persona: '{id}'")]
    UnknownPersona { id: String },

    /// Credentials are missing or were rejected by the completion service.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The completion service is throttling requests.
    #[error("Rate limited: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
    },

    /// Network failure, timeout or non-success response from the service.
    ///
    /// `transient` is set for conditions worth resubmitting (connect errors,
    /// timeouts, 5xx gateway statuses) and cleared for permanent rejections
    /// such as a 400 for an unknown model.
    #[error("Completion service unavailable: {message}")]
    ServiceUnavailable { message: String, transient: bool },

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdvisorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownPersona error
    pub fn unknown_persona(id: impl Into<String>) -> Self {
        Self::UnknownPersona { id: id.into() }
    }

    /// Creates an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates a RateLimit error
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates a transient ServiceUnavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            transient: true,
        }
    }

    /// Creates a ServiceUnavailable error that resubmitting will not fix
    pub fn service_rejected(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            transient: false,
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns true for transient service conditions that may succeed on resubmission.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } => true,
            Self::ServiceUnavailable { transient, .. } => *transient,
            _ => false,
        }
    }

    /// Delay requested by the service before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Stable label for the error kind, shown by the interaction shell.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EmptyInputError",
            Self::UnknownPersona { .. } => "UnknownPersonaError",
            Self::Authentication(_) => "AuthenticationError",
            Self::RateLimit { .. } => "RateLimitError",
            Self::ServiceUnavailable { .. } => "ServiceUnavailableError",
            Self::Config(_) => "ConfigError",
        }
    }
}

/// A type alias for `Result<T, AdvisorError>`.
pub type Result<T> = std::result::Result<T, AdvisorError>;
