//! Metadata value model
//!
//! Metadata is a closed recursive value type: null, bool, number, string,
//! ordered list, or ordered map. `serde_json` is built with
//! `preserve_order`, so maps iterate in insertion order and decode/encode
//! keep the key order found in the source document.

pub use serde_json::Value;

/// Key-unique, insertion-ordered metadata map.
pub type Metadata = serde_json::Map<String, Value>;

/// Treat a decoded frontmatter value as metadata.
///
/// Only a top-level mapping contributes keys. An empty block decodes to
/// null, and scalars or lists at the top level carry no keys, so both
/// yield an empty map.
pub(crate) fn into_metadata(format: crate::Format, value: Value) -> Metadata {
    match value {
        Value::Object(map) => map,
        Value::Null => Metadata::new(),
        other => {
            tracing::debug!(
                format = %format,
                kind = kind_name(&other),
                "ignoring frontmatter that is not a mapping"
            );
            Metadata::new()
        }
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
