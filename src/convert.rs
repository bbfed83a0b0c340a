//! Response-side conversion: raw response plus resolved format in, final
//! output value out.
//!
//! Conversion is a stateless pure function per call with one arm per format
//! variant and no fallthrough. Either a fully converted [`Output`] is
//! returned or a typed failure; there is never a half-populated value.

use crate::error::{LlmError, LlmResult};
use crate::format::OutputFormat;
use crate::payload::extract_json_payload;
use crate::protocol::ChatResponse;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// The converted output, polymorphic over the four format shapes.
pub enum Output {
    /// Primary generated text.
    Text(String),
    /// The raw response, returned unchanged.
    Raw(ChatResponse),
    /// Structured payload validated against the requested schema.
    Structured(Value),
    /// Value produced by a caller-supplied converter.
    Custom(Box<dyn Any + Send>),
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Output::Raw(response) => f.debug_tuple("Raw").field(response).finish(),
            Output::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Output::Custom(_) => f.debug_tuple("Custom").field(&"<erased>").finish(),
        }
    }
}

impl Output {
    /// The text content, if this is a plain-text output.
    pub fn into_text(self) -> Option<String> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw response, if this is a raw output.
    pub fn into_raw(self) -> Option<ChatResponse> {
        match self {
            Output::Raw(response) => Some(response),
            _ => None,
        }
    }

    /// The validated structured payload, if this is a structured output.
    pub fn into_structured(self) -> Option<Value> {
        match self {
            Output::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// Downcast a custom output to its concrete type.
    pub fn into_custom<T: 'static>(self) -> Option<T> {
        match self {
            Output::Custom(boxed) => boxed.downcast::<T>().ok().map(|value| *value),
            _ => None,
        }
    }
}

/// Converts raw responses into caller-facing outputs.
pub struct OutputConverter;

impl OutputConverter {
    /// Convert a raw response according to the resolved format.
    ///
    /// Fails with [`LlmError::MalformedResponse`] when the response lacks the
    /// content the requested shape requires, and with
    /// [`LlmError::ConversionFailure`] when a custom converter raises.
    pub fn to_output(response: ChatResponse, format: &OutputFormat) -> LlmResult<Output> {
        match format {
            OutputFormat::PlainText => {
                let content = response.primary_content().ok_or_else(|| {
                    LlmError::malformed_response("response contains no generated text")
                })?;
                Ok(Output::Text(content.to_string()))
            }
            OutputFormat::RawResponse => Ok(Output::Raw(response)),
            OutputFormat::StructuredModel { schema } => {
                let content = response.primary_content().ok_or_else(|| {
                    LlmError::malformed_response(
                        "structured output requested but response contains no content",
                    )
                })?;
                let payload = extract_json_payload(content)?;
                schema.validate(&payload)?;
                Ok(Output::Structured(payload))
            }
            OutputFormat::CustomModel { converter } => converter
                .build_from_response(&response)
                .map(Output::Custom)
                .map_err(LlmError::conversion_failure),
        }
    }
}
