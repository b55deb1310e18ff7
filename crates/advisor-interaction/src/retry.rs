//! Opt-in retry decorator for completion clients.
//!
//! Only transient failures (`RateLimit`, `ServiceUnavailable`) are retried.
//! A server-provided `Retry-After` wins over the exponential backoff; both are
//! capped by the policy's `max_delay` so a single wait stays bounded.

use std::sync::Arc;

use advisor_core::config::RetryPolicy;
use advisor_core::{CompletionClient, Exchange, Result};
use async_trait::async_trait;

pub struct RetryingCompletionClient {
    inner: Arc<dyn CompletionClient>,
    policy: RetryPolicy,
}

impl RetryingCompletionClient {
    pub fn new(inner: Arc<dyn CompletionClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl CompletionClient for RetryingCompletionClient {
    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, exchange: &Exchange) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(exchange).await {
                Ok(answer) => return Ok(answer),
                Err(err) if err.is_retryable() && attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(err.retry_after(), attempt);
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        kind = err.kind(),
                        "Retrying completion"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
