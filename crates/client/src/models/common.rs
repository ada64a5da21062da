//! Common types shared across Splunk API models.
//!
//! This module contains the Atom-style `entry` wrapper that every listing
//! endpoint returns, plus the job-message flattening used by search. It does
//! NOT contain resource-specific models.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// One element of a Splunk `entry` array.
#[derive(Debug, Deserialize, Clone)]
pub struct Entry<T> {
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub author: String,
    #[serde(default)]
    pub acl: Option<Acl>,
    pub content: T,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Acl {
    #[serde(default, deserialize_with = "crate::serde_helpers::string_from_any")]
    pub app: String,
}

/// Decode every element of `body["entry"]`.
///
/// A body without an `entry` array (including XML-normalized bodies) yields an
/// empty list. An entry without `content` decodes from an empty object. An
/// entry that does not decode is skipped with a warning; the rest are kept.
pub fn entries<T: DeserializeOwned>(body: &Value) -> Vec<Entry<T>> {
    let Some(items) = body.get("entry").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let mut item = item.clone();
            if let Some(obj) = item.as_object_mut() {
                obj.entry("content")
                    .or_insert_with(|| Value::Object(Default::default()));
            }
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
            match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(entry = %name, error = %e, "Skipping malformed entry");
                    None
                }
            }
        })
        .collect()
}

/// Content object of the first entry, if any.
pub fn first_entry_content(body: &Value) -> Option<&Value> {
    body.get("entry")?.get(0)?.get("content")
}

/// Flatten Splunk's message shapes into display strings.
///
/// Accepts a list of `{type, text}` objects, a list of strings, a mapping of
/// `type -> [text, ...]`, or a bare string.
pub fn collect_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(collect_message_item).collect(),
        Value::Object(map) => map
            .iter()
            .flat_map(|(kind, texts)| {
                collect_messages(texts)
                    .into_iter()
                    .map(move |text| format!("{}: {}", kind.to_uppercase(), text))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn collect_message_item(item: &Value) -> Vec<String> {
    match item {
        Value::Object(map) => {
            let text = map.get("text").and_then(Value::as_str).unwrap_or_default();
            match map.get("type").and_then(Value::as_str) {
                Some(kind) if !text.is_empty() => vec![format!("{}: {}", kind, text)],
                _ if !text.is_empty() => vec![text.to_string()],
                _ => Vec::new(),
            }
        }
        other => collect_messages(other),
    }
}
