//! OpenAiCompletionClient - Direct REST API implementation for OpenAI-compatible chat completions.
//!
//! Sends a system message carrying the persona instruction and a user message
//! carrying the question. The API key is read once at construction; when it is
//! absent every call fails with `AdvisorError::Authentication` without touching
//! the network.

use std::time::{Duration, Instant};

use advisor_core::config::CompletionSettings;
use advisor_core::{AdvisorError, ChatMessage, CompletionClient, Exchange, Result};
use advisor_infrastructure::{API_KEY_ENV, ApiKey};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};

/// Completion client that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: Option<ApiKey>,
    settings: CompletionSettings,
}

impl OpenAiCompletionClient {
    /// Creates a client with fixed settings.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Config` if the HTTP client cannot be initialised.
    pub fn new(api_key: Option<ApiKey>, settings: CompletionSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| AdvisorError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    async fn send_request(&self, api_key: &ApiKey, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", api_key.expose()))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| map_transport_error(err, self.settings.timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            AdvisorError::service_rejected(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, exchange: &Exchange) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AdvisorError::authentication(format!(
                "{API_KEY_ENV} is not set in the environment or .env file"
            ))
        })?;

        let request = ChatCompletionRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature.value(),
            messages: exchange.messages(),
        };

        let started = Instant::now();
        let result = self.send_request(api_key, &request).await;
        match &result {
            Ok(answer) => tracing::info!(
                model = %self.settings.model,
                elapsed_ms = started.elapsed().as_millis() as u64,
                answer_len = answer.len(),
                "Completion succeeded"
            ),
            Err(err) => tracing::warn!(
                model = %self.settings.model,
                elapsed_ms = started.elapsed().as_millis() as u64,
                kind = err.kind(),
                "Completion failed: {}",
                err
            ),
        }
        result
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage; 2],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            AdvisorError::service_rejected("OpenAI API returned no content in the response")
        })
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> AdvisorError {
    if err.is_timeout() {
        AdvisorError::service_unavailable(format!(
            "OpenAI API request timed out after {}s",
            timeout.as_secs_f32()
        ))
    } else if err.is_connect() {
        AdvisorError::service_unavailable(format!("OpenAI API request failed: {err}"))
    } else {
        AdvisorError::service_rejected(format!("OpenAI API request failed: {err}"))
    }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AdvisorError {
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    let message = format!("HTTP {}: {}", status.as_u16(), detail);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdvisorError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => AdvisorError::rate_limit(message, retry_after),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => AdvisorError::service_unavailable(message),
        _ => AdvisorError::service_rejected(message),
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.trim().parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_uses_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let err = map_http_error(StatusCode::UNAUTHORIZED, body.to_string(), None);
        assert_eq!(
            err,
            AdvisorError::authentication("HTTP 401: Incorrect API key provided")
        );
    }

    #[test]
    fn test_map_http_error_status_classes() {
        assert_eq!(
            map_http_error(StatusCode::FORBIDDEN, String::new(), None).kind(),
            "AuthenticationError"
        );
        assert_eq!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, String::new(), None).kind(),
            "RateLimitError"
        );
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert_eq!(
                map_http_error(status, "oops".to_string(), None).kind(),
                "ServiceUnavailableError"
            );
        }
    }

    #[test]
    fn test_only_gateway_statuses_are_retryable() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(map_http_error(status, String::new(), None).is_retryable(), "{status}");
        }
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::UNAUTHORIZED,
        ] {
            assert!(!map_http_error(status, String::new(), None).is_retryable(), "{status}");
        }
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let delay = Duration::from_secs(7);
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, String::new(), Some(delay));
        assert_eq!(err.retry_after(), Some(delay));
    }

    #[test]
    fn test_parse_retry_after() {
        let seconds = HeaderValue::from_static("12");
        assert_eq!(
            parse_retry_after(Some(&seconds)),
            Some(Duration::from_secs(12))
        );
        let date = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_extract_text_response_requires_content() {
        let empty = ChatCompletionResponse { choices: vec![] };
        assert_eq!(
            extract_text_response(empty).unwrap_err().kind(),
            "ServiceUnavailableError"
        );

        let null_content = ChatCompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage { content: None },
            }],
        };
        let err = extract_text_response(null_content).unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_key_fails_with_authentication_error() {
        let client = OpenAiCompletionClient::new(None, CompletionSettings::default()).unwrap();
        let persona = advisor_core::Persona::new("tutor", "Be helpful.");
        let exchange = advisor_core::prompt::build(&persona, "hello").unwrap();

        let err = client.complete(&exchange).await.unwrap_err();
        assert_eq!(err.kind(), "AuthenticationError");
    }
}
