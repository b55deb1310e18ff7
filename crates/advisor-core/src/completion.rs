//! Completion client contract.
//!
//! Implementations live in `advisor-interaction`; tests inject stubs.

use crate::error::Result;
use crate::prompt::Exchange;

/// Sends an exchange to a text-completion service and returns the answer.
///
/// Every call performs a fresh request; implementations must not cache.
/// Failures are reported as `AdvisorError::Authentication`,
/// `AdvisorError::RateLimit` or `AdvisorError::ServiceUnavailable`.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier used for requests (for logging and display).
    fn model(&self) -> &str;

    /// Executes one completion request.
    async fn complete(&self, exchange: &Exchange) -> Result<String>;
}
