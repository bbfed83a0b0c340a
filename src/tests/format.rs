// Unit tests for output format resolution
//
// UNIT UNDER TEST: OutputFormat / FormatHint
//
// BUSINESS RESPONSIBILITY:
//   - Resolves a caller hint into exactly one of four format shapes
//   - Rejects unrecognized hints before any network call
//   - Derives the request-side generation contract (response_format)

use crate::error::LlmError;
use crate::format::{FormatHint, OutputFormat, PLAIN_TEXT_TOKEN, RAW_RESPONSE_TOKEN};
use crate::protocol::ResponseFormat;
use crate::schema::SchemaSpec;
use crate::tests::helpers::{Answer, FirstLineConverter};
use serde_json::json;

mod resolution_tests {
    use super::*;

    #[test]
    fn plain_text_token_resolves_to_plain_text() {
        let format = OutputFormat::resolve(PLAIN_TEXT_TOKEN.into()).expect("resolution failed");
        assert!(matches!(format, OutputFormat::PlainText));
    }

    #[test]
    fn raw_response_token_resolves_to_raw_response() {
        let format = OutputFormat::resolve(RAW_RESPONSE_TOKEN.into()).expect("resolution failed");
        assert!(matches!(format, OutputFormat::RawResponse));
    }

    #[test]
    fn resolution_is_deterministic() {
        // Same hint must resolve to the same variant every time.
        for _ in 0..3 {
            let format = OutputFormat::resolve("str".into()).expect("resolution failed");
            assert!(matches!(format, OutputFormat::PlainText));
        }
    }

    #[test]
    fn structured_hint_resolves_to_structured_model() {
        let format = OutputFormat::resolve(FormatHint::structured::<Answer>())
            .expect("resolution failed");

        let OutputFormat::StructuredModel { schema } = format else {
            panic!("expected StructuredModel");
        };
        assert_eq!(schema.name, "Answer");
        let required = schema.schema["required"]
            .as_array()
            .expect("schema has no required list");
        assert!(required.iter().any(|field| field == "answer"));
    }

    #[test]
    fn custom_hint_resolves_to_custom_model() {
        let format = OutputFormat::resolve(FormatHint::custom(FirstLineConverter))
            .expect("resolution failed");
        assert!(matches!(format, OutputFormat::CustomModel { .. }));
    }

    #[test]
    fn unrecognized_token_fails_with_unsupported_format_kind() {
        let result = OutputFormat::resolve("json".into());

        match result {
            Err(LlmError::UnsupportedFormatKind { kind }) => assert_eq!(kind, "json"),
            other => panic!("expected UnsupportedFormatKind, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_fails_with_unsupported_format_kind() {
        let result = OutputFormat::resolve("".into());
        assert!(matches!(
            result,
            Err(LlmError::UnsupportedFormatKind { .. })
        ));
    }
}

mod generation_contract_tests {
    use super::*;

    #[test]
    fn plain_text_derives_no_response_format() {
        assert!(OutputFormat::PlainText.response_format().is_none());
    }

    #[test]
    fn raw_response_derives_no_response_format() {
        assert!(OutputFormat::RawResponse.response_format().is_none());
    }

    #[test]
    fn custom_model_derives_no_response_format() {
        // The service is never told about a custom output type.
        let format = OutputFormat::resolve(FormatHint::custom(FirstLineConverter))
            .expect("resolution failed");
        assert!(format.response_format().is_none());
    }

    #[test]
    fn structured_model_derives_strict_json_schema_contract() {
        let spec = SchemaSpec::new(
            "answer_schema",
            json!({
                "type": "object",
                "properties": { "answer": { "type": "string" } },
                "required": ["answer"]
            }),
        );
        let format = OutputFormat::StructuredModel { schema: spec };

        let contract = format.response_format().expect("no contract derived");
        let ResponseFormat::JsonSchema { json_schema } = contract;
        assert_eq!(json_schema.name, "answer_schema");
        assert_eq!(json_schema.strict, Some(true));
        assert_eq!(json_schema.schema["required"][0], "answer");
    }

    #[test]
    fn structured_contract_serializes_with_json_schema_tag() {
        let format = OutputFormat::StructuredModel {
            schema: SchemaSpec::new("s", json!({"type": "object"})),
        };

        let wire = serde_json::to_value(format.response_format()).expect("serialization failed");
        assert_eq!(wire["type"], "json_schema");
        assert_eq!(wire["json_schema"]["name"], "s");
    }
}
