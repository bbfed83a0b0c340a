// Shared test helpers: canned responses, sample structured types, and a
// stub transport that records outbound requests.

use crate::config::Connection;
use crate::error::LlmResult;
use crate::format::ResponseConverter;
use crate::protocol::{ChatRequest, ChatResponse, Choice, ResponseMessage, Usage};
use crate::transport::CompletionTransport;
use async_trait::async_trait;
use serde::Deserialize;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A well-formed response whose first choice carries `content`.
pub fn response_with_text(content: &str) -> ChatResponse {
    ChatResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                role: "assistant".to_string(),
                content: Some(content.to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: Some("test-model".to_string()),
    }
}

/// A response with an empty choices array.
pub fn response_without_choices() -> ChatResponse {
    ChatResponse {
        choices: vec![],
        usage: None,
        model: None,
    }
}

/// A response whose first choice has no content field.
pub fn response_without_content() -> ChatResponse {
    ChatResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                role: "assistant".to_string(),
                content: None,
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
        model: None,
    }
}

/// Sample structured output type with one required field.
#[derive(Debug, PartialEq, Deserialize, schemars::JsonSchema)]
pub struct Answer {
    pub answer: String,
}

/// A test connection that passes validation.
pub fn test_connection() -> Connection {
    Connection::new("test-model", "http://localhost:9", "test-key")
}

/// Converter that extracts the first line of the generated text.
#[derive(Debug)]
pub struct FirstLineConverter;

impl ResponseConverter for FirstLineConverter {
    fn build_from_response(&self, response: &ChatResponse) -> anyhow::Result<Box<dyn Any + Send>> {
        let content = response
            .primary_content()
            .ok_or_else(|| anyhow::anyhow!("no content to convert"))?;
        let first_line = content.lines().next().unwrap_or_default().to_string();
        Ok(Box::new(first_line))
    }
}

/// Converter that always fails, for failure-wrapping tests.
#[derive(Debug)]
pub struct FailingConverter;

impl ResponseConverter for FailingConverter {
    fn build_from_response(&self, _response: &ChatResponse) -> anyhow::Result<Box<dyn Any + Send>> {
        Err(anyhow::anyhow!("converter exploded"))
    }
}

/// Converter that counts how many times it is invoked.
#[derive(Debug)]
pub struct CountingConverter {
    pub calls: Arc<AtomicUsize>,
}

impl ResponseConverter for CountingConverter {
    fn build_from_response(&self, _response: &ChatResponse) -> anyhow::Result<Box<dyn Any + Send>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(()))
    }
}

/// Transport stub that returns a canned response and records every request.
pub struct StubTransport {
    response: ChatResponse,
    seen: Arc<Mutex<Vec<ChatRequest>>>,
}

impl StubTransport {
    /// Returns the stub and a handle to the recorded requests.
    pub fn new(response: ChatResponse) -> (Self, Arc<Mutex<Vec<ChatRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                response,
                seen: Arc::clone(&seen),
            },
            seen,
        )
    }
}

#[async_trait]
impl CompletionTransport for StubTransport {
    async fn execute(
        &self,
        _connection: &Connection,
        request: &ChatRequest,
    ) -> LlmResult<ChatResponse> {
        self.seen
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        Ok(self.response.clone())
    }
}
