//! Response body normalization.
//!
//! Responsibilities:
//! - Decode a response body into a `serde_json::Value` based on its content type.
//! - Convert XML documents into the nested-mapping shape every caller expects.
//!
//! Does NOT handle:
//! - Status-code checks (see `endpoints::request`).
//!
//! Invariants:
//! - JSON bodies decode as-is; an empty JSON body becomes `{}`.
//! - XML: the root element becomes a single-key object. Attributes are `@name`.
//!   Text-only elements become strings and empty elements become `null`.
//!   Text next to attributes or children is stored under `#text`.
//!   Repeated sibling elements collapse into an array.
//! - Anything else becomes `{"text": body}`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// Deepest XML nesting accepted before the document is rejected.
const MAX_XML_DEPTH: usize = 256;

/// Decode `body` according to the `Content-Type` header value.
pub fn normalize_body(content_type: &str, body: &str) -> Result<Value> {
    let content_type = content_type.to_ascii_lowercase();

    if content_type.contains("application/json") {
        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(body)
            .map_err(|e| ClientError::InvalidResponse(format!("Malformed JSON body: {}", e)))
    } else if content_type.contains("text/xml") || content_type.contains("application/xml") {
        xml_to_value(body)
    } else {
        let mut map = Map::new();
        map.insert("text".to_string(), Value::String(body.to_string()));
        Ok(Value::Object(map))
    }
}

struct Node {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Node {
    fn open(elem: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(elem.name().as_ref()).to_string();
        let mut fields = Map::new();
        for attr in elem.attributes().flatten() {
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr
                .unescape_value()
                .map(|v| v.to_string())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
            fields.insert(key, Value::String(value));
        }
        Self {
            name,
            fields,
            text: String::new(),
        }
    }

    fn close(mut self) -> (String, Value) {
        let value = if self.fields.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            if !self.text.is_empty() {
                self.fields
                    .insert("#text".to_string(), Value::String(self.text));
            }
            Value::Object(self.fields)
        };
        (self.name, value)
    }
}

fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Convert an XML document into a nested mapping.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root = Map::new();
    let mut stack: Vec<Node> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if stack.len() >= MAX_XML_DEPTH {
                    return Err(ClientError::InvalidResponse(format!(
                        "XML nesting exceeds {} levels",
                        MAX_XML_DEPTH
                    )));
                }
                stack.push(Node::open(&e));
            }
            Ok(Event::Empty(e)) => {
                let (name, value) = Node::open(&e).close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| ClientError::InvalidResponse(format!("Malformed XML text: {}", e)))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let Some(node) = stack.pop() else {
                    return Err(ClientError::InvalidResponse(
                        "Unbalanced XML end tag".to_string(),
                    ));
                };
                let (name, value) = node.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ClientError::InvalidResponse(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ClientError::InvalidResponse(
            "XML document ended with unclosed elements".to_string(),
        ));
    }

    Ok(Value::Object(root))
}
