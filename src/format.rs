//! Output format resolution.
//!
//! A caller states how it wants the completion back with a [`FormatHint`]:
//! a literal token, a schema descriptor, or a custom converter. The hint is
//! resolved exactly once per call into an [`OutputFormat`], a closed tagged
//! union the rest of the pipeline dispatches on with exhaustive matching.
//! An unrecognized hint fails with `UnsupportedFormatKind` before any network
//! call is made; no partially-resolved value exists outside this module.

use crate::error::{LlmError, LlmResult};
use crate::protocol::{ChatResponse, JsonSchemaFormat, ResponseFormat};
use crate::schema::{SchemaSpec, StructuredOutput};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Token selecting plain-text output.
pub const PLAIN_TEXT_TOKEN: &str = "str";

/// Token selecting the raw, unconverted response.
pub const RAW_RESPONSE_TOKEN: &str = "all";

/// Capability for types that build themselves from a raw response.
///
/// The completion service is never told about a custom output type; the
/// converter runs entirely after the call, exactly once per conversion.
pub trait ResponseConverter: Send + Sync + fmt::Debug {
    /// Build the custom output value from the raw response.
    ///
    /// The returned value is type-erased; callers recover the concrete type
    /// with [`Output::into_custom`](crate::convert::Output::into_custom).
    fn build_from_response(&self, response: &ChatResponse) -> anyhow::Result<Box<dyn Any + Send>>;
}

/// Caller-supplied hint describing the desired output shape.
#[derive(Debug, Clone)]
pub enum FormatHint {
    /// A literal token: [`PLAIN_TEXT_TOKEN`] or [`RAW_RESPONSE_TOKEN`].
    Token(String),
    /// A schema-bearing data model the service should emit directly.
    Structured(SchemaSpec),
    /// A type that knows how to build itself from a raw response.
    Custom(Arc<dyn ResponseConverter>),
}

impl FormatHint {
    /// Hint for a structured output type.
    pub fn structured<T: StructuredOutput>() -> Self {
        Self::Structured(SchemaSpec::of::<T>())
    }

    /// Hint for a custom post-processing converter.
    pub fn custom<C: ResponseConverter + 'static>(converter: C) -> Self {
        Self::Custom(Arc::new(converter))
    }
}

impl From<&str> for FormatHint {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<String> for FormatHint {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<SchemaSpec> for FormatHint {
    fn from(spec: SchemaSpec) -> Self {
        Self::Structured(spec)
    }
}

/// Resolved output format. Exactly one variant is active per call; an
/// instance is constructed once, drives both the request-side generation
/// contract and the response-side conversion, then is discarded.
#[derive(Debug, Clone)]
pub enum OutputFormat {
    /// Return the primary generated text.
    PlainText,
    /// Return the raw response unchanged.
    RawResponse,
    /// Instruct the service to emit content conforming to `schema`.
    StructuredModel { schema: SchemaSpec },
    /// Post-process the raw response with a caller-supplied converter.
    CustomModel { converter: Arc<dyn ResponseConverter> },
}

impl OutputFormat {
    /// Resolve a caller hint into an output format.
    ///
    /// Total over the three hint shapes; the only failure is a token outside
    /// the two recognized literals, which yields
    /// [`LlmError::UnsupportedFormatKind`].
    pub fn resolve(hint: FormatHint) -> LlmResult<Self> {
        match hint {
            FormatHint::Token(token) if token == PLAIN_TEXT_TOKEN => Ok(Self::PlainText),
            FormatHint::Token(token) if token == RAW_RESPONSE_TOKEN => Ok(Self::RawResponse),
            FormatHint::Token(token) => Err(LlmError::unsupported_format_kind(token)),
            FormatHint::Structured(schema) => Ok(Self::StructuredModel { schema }),
            FormatHint::Custom(converter) => Ok(Self::CustomModel { converter }),
        }
    }

    /// Derive the generation-contract parameter merged into the outbound
    /// request.
    ///
    /// Only a structured model instructs the service. Plain text and raw
    /// output omit the parameter, which selects the service's default text
    /// mode, and a custom converter is never announced because conversion
    /// happens entirely after the call.
    pub fn response_format(&self) -> Option<ResponseFormat> {
        match self {
            Self::PlainText | Self::RawResponse | Self::CustomModel { .. } => None,
            Self::StructuredModel { schema } => Some(ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: schema.name.clone(),
                    schema: schema.schema.clone(),
                    strict: Some(true),
                },
            }),
        }
    }
}
