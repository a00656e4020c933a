//! Reply normalization
//!
//! Backends reply with varying shapes: a JSON object, a JSON object
//! encoded as a string, or plain text. This module extracts a display
//! string and an optional tool list from any of them. Normalization is
//! total: it always produces a content string and never fails.

use crate::message::ToolUse;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Content used when an object reply carries neither `response` nor
/// `message`.
pub const NO_RESPONSE_FALLBACK: &str = "No response received";

static RESPONSE_FIELD_RE: OnceLock<Regex> = OnceLock::new();

/// A normalized backend reply: display content plus optional tool
/// annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    pub content: String,
    pub tools: Option<Vec<ToolUse>>,
}

impl NormalizedReply {
    fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tools: None,
        }
    }
}

/// Normalize a raw backend reply using the default missing-content
/// fallback.
///
/// # Examples
///
/// ```
/// use parlay::normalizer::normalize;
/// use serde_json::json;
///
/// assert_eq!(normalize(&json!({"response": "hi"})).content, "hi");
/// assert_eq!(normalize(&json!("plain text")).content, "plain text");
/// assert_eq!(normalize(&json!(42)).content, "42");
/// ```
pub fn normalize(raw: &Value) -> NormalizedReply {
    normalize_with_fallback(raw, NO_RESPONSE_FALLBACK)
}

/// Normalize a raw backend reply, substituting `fallback` when an object
/// reply carries neither `response` nor `message`.
///
/// Resolution order, first match wins:
/// 1. Objects: `response` field, else `message` field, else `fallback`;
///    a `tools` array is mapped element-by-element with field defaults.
/// 2. Strings shaped like a JSON object (`{...}` after trimming) are
///    parsed and treated as step 1, except the original string stands in
///    for the fallback.
/// 3. Other strings: best-effort `"response": "..."` extraction via
///    [`extract_response_field`], else the string unchanged.
/// 4. Anything else: the value rendered as text.
pub fn normalize_with_fallback(raw: &Value, fallback: &str) -> NormalizedReply {
    match raw {
        Value::Object(map) => normalize_object(map, fallback),
        Value::String(text) => normalize_text(text),
        other => NormalizedReply::text(display_value(other)),
    }
}

fn normalize_object(map: &Map<String, Value>, missing: &str) -> NormalizedReply {
    let content = string_field(map, "response")
        .or_else(|| string_field(map, "message"))
        .unwrap_or_else(|| missing.to_string());

    let tools = map
        .get("tools")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(ToolUse::from_value).collect());

    NormalizedReply { content, tools }
}

fn normalize_text(text: &str) -> NormalizedReply {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
            return normalize_object(&map, text);
        }
    }

    let content = extract_response_field(text).unwrap_or_else(|| text.to_string());
    NormalizedReply::text(content)
}

/// Best-effort extraction of a `"response": "..."` substring.
///
/// Captures the first match only and does not handle escaped quotes or
/// nested braces; isolated here so it can be replaced by strict parsing
/// if the backend contract is ever tightened.
pub fn extract_response_field(text: &str) -> Option<String> {
    let re = RESPONSE_FIELD_RE.get_or_init(|| {
        Regex::new(r#""response"\s*:\s*"([^"]*)""#).expect("literal pattern is valid")
    });
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A field counts as present when it exists and is not null; non-string
/// values are rendered as text.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(display_value(value)),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
