//! # llm-bridge
//!
//! Minimal boundary layer between editor integrations and hosted LLM
//! completion APIs: role-tagged messages plus a named connection in, one
//! completion request out, and the raw response converted into the shape the
//! caller asked for.
//!
//! ## Key pieces
//!
//! - **Output formats**: a closed four-shape model — plain text, raw
//!   response, schema-validated structured output, or a caller-supplied
//!   converter — resolved once per call from a [`FormatHint`]
//! - **Connections**: named `{model, base_url, api_key}` descriptors stored
//!   as JSON files under the user config directory
//! - **Stateless calls**: no conversation memory, no retries, no prompt
//!   templating; every failure surfaces to the caller as a typed [`LlmError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_bridge::{Connection, LlmClient, Message};
//!
//! # async fn example() -> llm_bridge::LlmResult<()> {
//! let connection = Connection::new("gpt-4o", "https://api.openai.com/v1", "SECRET-KEY");
//! let client = LlmClient::new(connection)?;
//!
//! let text = client
//!     .completion_text(vec![Message::user("Hello, how are you?")])
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod messages;
pub mod protocol;
pub mod schema;
pub mod transport;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

// Structured payload extraction - internal only
pub(crate) mod payload;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use client::LlmClient;
pub use config::{Connection, ConnectionStore, GenerationParams, DEFAULT_CONNECTION};
pub use convert::{Output, OutputConverter};
pub use error::{ErrorCategory, ErrorSeverity, LlmError, LlmResult};
pub use format::{
    FormatHint, OutputFormat, ResponseConverter, PLAIN_TEXT_TOKEN, RAW_RESPONSE_TOKEN,
};
pub use messages::{Message, MessageRole};
pub use protocol::{ChatRequest, ChatResponse, ResponseFormat};
pub use schema::{SchemaSpec, StructuredOutput};
pub use transport::{CompletionTransport, HttpTransport};
