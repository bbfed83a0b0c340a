//! Structured payload extraction from completion text.
//!
//! Models wrap JSON in code fences or surrounding prose often enough that a
//! direct parse is not sufficient. Extraction runs a fallback ladder:
//! direct parse, strip known fence artifacts, then pull a balanced JSON
//! object out of mixed content. If none succeed the payload is malformed.

use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_warn};
use serde_json::Value;

/// Extract the structured JSON payload from raw completion text.
pub(crate) fn extract_json_payload(raw: &str) -> LlmResult<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }

    let stripped = strip_fence_artifacts(raw);
    if stripped != raw {
        if let Ok(value) = serde_json::from_str::<Value>(&stripped) {
            log_debug!(
                original_length = raw.len(),
                stripped_length = stripped.len(),
                "Parsed structured payload after stripping fence artifacts"
            );
            return Ok(value);
        }
    }

    if let Some(candidate) = balanced_object(&stripped) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            log_debug!(
                extracted_length = candidate.len(),
                "Parsed structured payload extracted from mixed content"
            );
            return Ok(value);
        }
    }

    let preview: String = raw.chars().take(200).collect();
    log_warn!(
        content_preview = %preview,
        "No structured JSON payload found in completion text"
    );
    Err(LlmError::malformed_response(format!(
        "no parseable JSON payload in completion text: {preview}{}",
        if raw.chars().count() > 200 { "..." } else { "" }
    )))
}

/// Remove code fence markers commonly emitted around JSON payloads.
fn strip_fence_artifacts(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Find the first balanced `{ ... }` object in mixed content.
///
/// Tracks string and escape state so braces inside string literals do not
/// affect the balance.
fn balanced_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let tail = &content[start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in tail.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tail[..idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
