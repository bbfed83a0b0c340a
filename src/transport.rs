//! Transport seam between the client and the completion service.
//!
//! [`CompletionTransport`] is the single suspension point in a call; the
//! production implementation is [`HttpTransport`] over reqwest. Exactly one
//! attempt per call; retry policy belongs to the caller.

use crate::config::Connection;
use crate::error::{LlmError, LlmResult};
use crate::logging::log_error;
use crate::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Executes one completion request against the service.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn execute(
        &self,
        connection: &Connection,
        request: &ChatRequest,
    ) -> LlmResult<ChatResponse>;
}

/// HTTP transport for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build authentication headers for the completion service.
    fn build_auth_headers(api_key: &str) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                LlmError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn execute(
        &self,
        connection: &Connection,
        request: &ChatRequest,
    ) -> LlmResult<ChatResponse> {
        // Connections built as struct literals or deserialized directly skip
        // the normalization in `Connection::new`, so trim here as well.
        let url = format!(
            "{}/chat/completions",
            connection.base_url.trim_end_matches('/')
        );
        let headers = Self::build_auth_headers(&connection.api_key)?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    url = %url,
                    error = %e,
                    "HTTP request failed"
                );
                LlmError::request_failed(format!("Request failed: {e}"), Some(Box::new(e)))
            })?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        parse_success_response(response).await
    }
}

/// Map non-success HTTP responses to typed errors.
async fn handle_error_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        status = %status,
        error_text = %error_text,
        "Completion service error response"
    );

    match status.as_u16() {
        401 | 403 => LlmError::authentication_failed("Invalid API key or authentication failed"),
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            LlmError::rate_limit_exceeded(retry_after_seconds)
        }
        _ => LlmError::request_failed(format!("API error {status}: {error_text}"), None),
    }
}

/// Parse a successful HTTP response into a [`ChatResponse`].
async fn parse_success_response(response: reqwest::Response) -> LlmResult<ChatResponse> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            error = %e,
            "Failed to read response body"
        );
        LlmError::malformed_response(format!("Failed to read response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            error = %e,
            raw_body = %raw_body,
            "Failed to parse completion response"
        );
        LlmError::malformed_response(format!("Invalid response body: {e}"))
    })
}
