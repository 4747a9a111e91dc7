//! Structured output decoding
//!
//! The model answers in free text that is supposed to be JSON. Three
//! deviations are tolerated:
//! - a markdown code fence around the payload (optionally language-tagged)
//! - a single-field wrapper object around the array, e.g. `{"items": [...]}`
//! - extra fields on each user object
//!
//! Anything else is an [`Error::OutputDecoding`] carrying the raw text.

use crate::error::{Error, Result};
use eagle_directory::User;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A```[A-Za-z0-9_-]*\s*").expect("OPENING_FENCE is a compile-time constant")
});

static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*```\z").expect("CLOSING_FENCE is a compile-time constant")
});

static FORMAT_INSTRUCTIONS: LazyLock<String> = LazyLock::new(|| {
    let schema = serde_json::to_string_pretty(&user_schema())
        .unwrap_or_else(|_| user_schema().to_string());
    format!(
        r#"Your response should be in JSON format.
The data structure for the JSON should be an object with a single field containing an array of User objects.
For example: {{"items": [{{...}}, {{...}}]}}
If no user matches, respond with {{"items": []}}.
The array elements should adhere to this JSON Schema:
```
{}
```
Do not include any explanations or markdown, only provide a RFC8259 compliant JSON response following this format without deviation."#,
        schema
    )
});

/// JSON schema of one user element
#[must_use]
pub fn user_schema() -> Value {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "userId": { "type": "integer" },
            "name": { "type": "string" },
            "email": { "type": "string" },
            "teamId": { "type": "integer" },
            "orgId": { "type": "integer" }
        },
        "required": ["userId", "name", "email", "teamId", "orgId"]
    })
}

/// Instructions appended to the user turn describing the expected answer shape
#[must_use]
pub fn format_instructions() -> &'static str {
    &FORMAT_INSTRUCTIONS
}

/// Remove a leading and a trailing markdown code fence, each if present
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(open) = OPENING_FENCE.find(text) {
        text = &text[open.end()..];
    }
    if let Some(close) = CLOSING_FENCE.find(text) {
        text = &text[..close.start()];
    }
    text
}

/// Decode the model's final answer into users, preserving order
pub fn decode(raw: &str) -> Result<Vec<User>> {
    debug!(raw = %raw, "Decoding model output");
    let text = strip_code_fence(raw);

    let value: Value = serde_json::from_str(text)
        .map_err(|e| decoding_error(format!("not valid JSON: {}", e), raw))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) if map.len() == 1 => {
            let (field, inner) = map
                .into_iter()
                .next()
                .ok_or_else(|| decoding_error("empty wrapper object", raw))?;
            match inner {
                Value::Array(items) => items,
                other => {
                    return Err(decoding_error(
                        format!("field \"{}\" holds {} instead of an array", field, kind(&other)),
                        raw,
                    ))
                }
            }
        }
        Value::Object(map) => {
            return Err(decoding_error(
                format!(
                    "expected an array or a single-field wrapper object, got an object with {} fields",
                    map.len()
                ),
                raw,
            ))
        }
        other => {
            return Err(decoding_error(
                format!("expected a JSON array, got {}", kind(&other)),
                raw,
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<User>(item)
                .map_err(|e| decoding_error(format!("element {}: {}", index, e), raw))
        })
        .collect()
}

fn decoding_error(reason: impl Into<String>, raw: &str) -> Error {
    Error::OutputDecoding {
        reason: reason.into(),
        raw: raw.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
