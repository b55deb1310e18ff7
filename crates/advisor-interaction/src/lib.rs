//! Completion backends and the per-session pipeline.

pub mod openai_client;
pub mod retry;
pub mod session;

use std::sync::Arc;

use advisor_core::config::CompletionConfig;
use advisor_core::{CompletionClient, Result};
use advisor_infrastructure::ApiKey;

pub use openai_client::OpenAiCompletionClient;
pub use retry::RetryingCompletionClient;
pub use session::AdvisorSession;

/// Builds the completion client described by `config`.
///
/// The client is wrapped in [`RetryingCompletionClient`] only when
/// `max_retries` is greater than zero.
pub fn build_completion_client(
    config: &CompletionConfig,
    api_key: Option<ApiKey>,
) -> Result<Arc<dyn CompletionClient>> {
    let settings = config.settings()?;
    if api_key.is_none() {
        tracing::warn!("No API key configured; requests will fail with an authentication error");
    }

    let client: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletionClient::new(api_key, settings)?);

    Ok(match config.retry_policy() {
        Some(policy) => {
            tracing::info!(max_retries = policy.max_retries, "Completion retries enabled");
            Arc::new(RetryingCompletionClient::new(client, policy))
        }
        None => client,
    })
}
