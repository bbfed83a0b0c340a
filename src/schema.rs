//! Schema descriptors for structured output.
//!
//! A [`SchemaSpec`] is the type descriptor carried by
//! [`OutputFormat::StructuredModel`](crate::format::OutputFormat): a named
//! JSON Schema the completion service is instructed to emit, and the same
//! schema the response payload is validated against afterwards.

use crate::error::{LlmError, LlmResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Capability marker for schema-bearing data models.
///
/// Satisfied by any type that derives `schemars::JsonSchema` and
/// `serde::Deserialize`; the blanket impl below derives both the schema name
/// and the JSON Schema document from those.
pub trait StructuredOutput: DeserializeOwned {
    /// Human-readable schema name sent to the completion service.
    fn schema_name() -> String;

    /// The JSON Schema document for this type.
    fn json_schema() -> Value;
}

impl<T> StructuredOutput for T
where
    T: schemars::JsonSchema + DeserializeOwned,
{
    fn schema_name() -> String {
        <T as schemars::JsonSchema>::schema_name()
    }

    fn json_schema() -> Value {
        let schema = schemars::schema_for!(T);
        serde_json::to_value(schema).unwrap_or_default()
    }
}

/// A named JSON Schema descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSpec {
    pub name: String,
    pub schema: Value,
}

impl SchemaSpec {
    /// Create a schema descriptor from a name and a JSON Schema document.
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Create a schema descriptor for a structured output type.
    pub fn of<T: StructuredOutput>() -> Self {
        Self {
            name: T::schema_name(),
            schema: T::json_schema(),
        }
    }

    /// Validate a response payload against this schema.
    ///
    /// Returns [`LlmError::MalformedResponse`] carrying the first few
    /// validation errors when the payload does not conform.
    pub fn validate(&self, instance: &Value) -> LlmResult<()> {
        let validator = jsonschema::validator_for(&self.schema).map_err(|e| {
            LlmError::configuration_error(format!(
                "schema `{}` is not a valid JSON Schema: {e}",
                self.name
            ))
        })?;

        if validator.validate(instance).is_err() {
            let mut details = Vec::new();
            for err in validator.iter_errors(instance) {
                details.push(format!("{err} at {}", err.instance_path));
                if details.len() >= 3 {
                    break;
                }
            }
            return Err(LlmError::malformed_response(format!(
                "payload does not match schema `{}`: {}",
                self.name,
                details.join("; ")
            )));
        }

        Ok(())
    }
}
