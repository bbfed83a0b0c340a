//! The completion client: one stateless call per invocation.
//!
//! A client owns a connection descriptor, optional generation parameters,
//! and a transport. Each [`completion`](LlmClient::completion) call resolves
//! the caller's format hint, attaches the derived generation contract to the
//! outbound request, performs a single attempt against the service, and
//! converts the raw response into the requested shape. No conversation
//! memory, no retries, no prompt templating.

use crate::config::{Connection, ConnectionStore, GenerationParams};
use crate::convert::{Output, OutputConverter};
use crate::error::{LlmError, LlmResult};
use crate::format::{FormatHint, OutputFormat};
use crate::logging::log_debug;
use crate::messages::Message;
use crate::protocol::{ChatMessage, ChatRequest, ChatResponse};
use crate::schema::StructuredOutput;
use crate::transport::{CompletionTransport, HttpTransport};

/// Stateless client for a single completion service connection.
pub struct LlmClient {
    connection: Connection,
    params: GenerationParams,
    transport: Box<dyn CompletionTransport>,
}

impl LlmClient {
    /// Create a client for a resolved connection descriptor.
    pub fn new(connection: Connection) -> LlmResult<Self> {
        connection.validate()?;
        Ok(Self {
            connection,
            params: GenerationParams::default(),
            transport: Box::new(HttpTransport::new()),
        })
    }

    /// Create a client by loading a named connection from the store.
    pub fn from_name(name: &str) -> LlmResult<Self> {
        let connection = ConnectionStore::new().load(name)?;
        Self::new(connection)
    }

    /// Set generation parameters for subsequent calls.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the transport. The seam used by tests and embedders.
    pub fn with_transport(mut self, transport: Box<dyn CompletionTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// The connection this client addresses.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute one completion and convert the response per the format hint.
    ///
    /// An unrecognized hint fails with
    /// [`LlmError::UnsupportedFormatKind`](crate::error::LlmError) before any
    /// request is sent.
    pub async fn completion(
        &self,
        messages: Vec<Message>,
        hint: impl Into<FormatHint>,
    ) -> LlmResult<Output> {
        let format = OutputFormat::resolve(hint.into())?;
        let request = self.build_request(&messages, &format);

        log_debug!(
            model = %request.model,
            message_count = request.messages.len(),
            has_response_format = request.response_format.is_some(),
            "Executing completion request"
        );

        let response = self.transport.execute(&self.connection, &request).await?;
        OutputConverter::to_output(response, &format)
    }

    /// Completion returning the primary generated text.
    pub async fn completion_text(&self, messages: Vec<Message>) -> LlmResult<String> {
        self.completion(messages, crate::format::PLAIN_TEXT_TOKEN)
            .await?
            .into_text()
            .ok_or_else(|| LlmError::malformed_response("expected plain text output"))
    }

    /// Completion returning the raw, unconverted response.
    pub async fn completion_raw(&self, messages: Vec<Message>) -> LlmResult<ChatResponse> {
        self.completion(messages, crate::format::RAW_RESPONSE_TOKEN)
            .await?
            .into_raw()
            .ok_or_else(|| LlmError::malformed_response("expected raw response output"))
    }

    /// Completion deserialized into a structured output type.
    ///
    /// The service is instructed to emit content conforming to `T`'s schema;
    /// the validated payload is then deserialized into `T`.
    pub async fn completion_structured<T: StructuredOutput>(
        &self,
        messages: Vec<Message>,
    ) -> LlmResult<T> {
        let payload = self
            .completion(messages, FormatHint::structured::<T>())
            .await?
            .into_structured()
            .ok_or_else(|| LlmError::malformed_response("expected structured output"))?;
        serde_json::from_value(payload).map_err(|e| {
            LlmError::malformed_response(format!("validated payload failed to deserialize: {e}"))
        })
    }

    fn build_request(&self, messages: &[Message], format: &OutputFormat) -> ChatRequest {
        ChatRequest {
            model: self.connection.model.clone(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            presence_penalty: self.params.presence_penalty,
            frequency_penalty: self.params.frequency_penalty,
            response_format: format.response_format(),
        }
    }
}
