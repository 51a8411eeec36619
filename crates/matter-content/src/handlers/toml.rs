//! TOML frontmatter handler
//!
//! Both directions go through `toml_edit`, so keys keep their order.
//! Strings are always written as single-line basic strings: a multi-line
//! string would put its lines at column 0, where a `+++` line reads as the
//! closing boundary.

use toml_edit::DocumentMut;

use crate::error::{Error, Result};
use crate::format::{Delimiters, Format, FrontmatterHandler};
use crate::registry::HandlerConfig;
use crate::value::{self, Metadata, Value};

/// Handler for TOML frontmatter between `+++` lines
#[derive(Debug, Clone)]
pub struct TomlHandler {
    delimiters: Delimiters,
}

impl Default for TomlHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlHandler {
    pub fn new() -> Self {
        Self::with_delimiters(Format::Toml.default_delimiters())
    }

    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    /// Build from configuration, falling back to `+++` for anything unset.
    pub fn from_config(config: &HandlerConfig) -> Result<Self> {
        Ok(Self::with_delimiters(
            config.delimiters_over(Format::Toml.default_delimiters())?,
        ))
    }
}

impl FrontmatterHandler for TomlHandler {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    fn decode(&self, frontmatter: &str) -> Result<Metadata> {
        let doc: DocumentMut = frontmatter
            .parse()
            .map_err(|e: toml_edit::TomlError| Error::format("TOML", e.to_string()))?;
        Ok(value::into_metadata(Format::Toml, table_to_value(doc.as_table())?))
    }

    fn encode(&self, metadata: &Metadata) -> Result<String> {
        let mut doc = DocumentMut::new();
        for (key, item) in metadata {
            doc.insert(key, value_to_item(item)?);
        }
        Ok(doc.to_string().trim().to_string())
    }
}

fn table_to_value(table: &toml_edit::Table) -> Result<Value> {
    let mut map = Metadata::new();
    for (key, item) in table.iter() {
        map.insert(key.to_string(), item_to_value(item)?);
    }
    Ok(Value::Object(map))
}

fn item_to_value(item: &toml_edit::Item) -> Result<Value> {
    match item {
        toml_edit::Item::Value(v) => toml_value_to_value(v),
        toml_edit::Item::Table(t) => table_to_value(t),
        toml_edit::Item::ArrayOfTables(arr) => Ok(Value::Array(
            arr.iter().map(table_to_value).collect::<Result<_>>()?,
        )),
        toml_edit::Item::None => Ok(Value::Null),
    }
}

fn toml_value_to_value(v: &toml_edit::Value) -> Result<Value> {
    Ok(match v {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::Number((*i.value()).into()),
        toml_edit::Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(Value::Number)
            .ok_or_else(|| Error::format("TOML", format!("unsupported float {}", f.value())))?,
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(d) => Value::String(d.value().to_string()),
        toml_edit::Value::Array(arr) => Value::Array(
            arr.iter()
                .map(toml_value_to_value)
                .collect::<Result<_>>()?,
        ),
        toml_edit::Value::InlineTable(t) => {
            let mut map = Metadata::new();
            for (key, item) in t.iter() {
                map.insert(key.to_string(), toml_value_to_value(item)?);
            }
            Value::Object(map)
        }
    })
}

fn value_to_item(value: &Value) -> Result<toml_edit::Item> {
    match value {
        Value::Object(obj) => Ok(toml_edit::Item::Table(object_to_table(obj)?)),
        Value::Array(arr) if is_array_of_tables(arr) => {
            let mut tables = toml_edit::ArrayOfTables::new();
            for item in arr {
                if let Value::Object(obj) = item {
                    tables.push(object_to_table(obj)?);
                }
            }
            Ok(toml_edit::Item::ArrayOfTables(tables))
        }
        other => Ok(toml_edit::Item::Value(value_to_toml(other)?)),
    }
}

fn is_array_of_tables(arr: &[Value]) -> bool {
    !arr.is_empty() && arr.iter().all(Value::is_object)
}

fn object_to_table(obj: &Metadata) -> Result<toml_edit::Table> {
    let mut table = toml_edit::Table::new();
    for (key, item) in obj {
        table.insert(key, value_to_item(item)?);
    }
    Ok(table)
}

/// Convert a metadata value to an inline `toml_edit::Value`
fn value_to_toml(value: &Value) -> Result<toml_edit::Value> {
    match value {
        Value::Null => Err(Error::format("TOML", "TOML does not support null values")),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if n.is_u64() {
                Err(Error::format("TOML", format!("integer {n} does not fit in i64")))
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(Error::format("TOML", "Invalid number"))
            }
        }
        Value::String(s) => basic_string(s),
        Value::Array(arr) => {
            let mut array = toml_edit::Array::new();
            for item in arr {
                array.push_formatted(value_to_toml(item)?);
            }
            Ok(toml_edit::Value::Array(array))
        }
        Value::Object(obj) => {
            let mut table = toml_edit::InlineTable::new();
            for (key, item) in obj {
                table.insert(key, value_to_toml(item)?);
            }
            Ok(toml_edit::Value::InlineTable(table))
        }
    }
}

/// A string value pinned to the escaped `"..."` form.
///
/// A JSON string literal is a valid TOML basic string once DEL, which JSON
/// leaves raw, is escaped. Parsing it back keeps that exact repr.
fn basic_string(s: &str) -> Result<toml_edit::Value> {
    let literal = serde_json::to_string(s)
        .map_err(|e| Error::format("TOML", e.to_string()))?
        .replace('\u{7f}', "\\u007f");
    literal
        .parse::<toml_edit::Value>()
        .map_err(|e| Error::format("TOML", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toml_decode_tables_and_arrays() {
        let handler = TomlHandler::new();
        let source = "title = \"Hello\"\ntags = [\"a\", \"b\"]\n\n[author]\nname = \"Ann\"\n\n[[links]]\nhref = \"/one\"\n\n[[links]]\nhref = \"/two\"\n";
        let meta = handler.decode(source).unwrap();
        assert_eq!(meta["title"], json!("Hello"));
        assert_eq!(meta["tags"], json!(["a", "b"]));
        assert_eq!(meta["author"], json!({"name": "Ann"}));
        assert_eq!(meta["links"], json!([{"href": "/one"}, {"href": "/two"}]));
    }

    #[test]
    fn test_toml_decode_keeps_key_order() {
        let handler = TomlHandler::new();
        let meta = handler.decode("zeta = 1\nalpha = 2\nmid = 3\n").unwrap();
        let keys: Vec<_> = meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_toml_datetime_as_string() {
        let handler = TomlHandler::new();
        let meta = handler.decode("date = 2024-03-01T10:00:00Z\n").unwrap();
        assert_eq!(meta["date"], json!("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn test_toml_decode_error() {
        let handler = TomlHandler::new();
        let err = handler.decode("[invalid\nkey = ").unwrap_err();
        assert!(matches!(err, Error::Format { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_toml_encode_rejects_null() {
        let handler = TomlHandler::new();
        let meta = json!({"title": "x", "draft": null});
        let err = handler.encode(meta.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_toml_encode_roundtrip() {
        let handler = TomlHandler::new();
        let meta = json!({
            "title": "Hello",
            "weight": 1.5,
            "count": 3,
            "tags": ["a", "b"],
            "author": {"name": "Ann"}
        });
        let meta = meta.as_object().unwrap();
        let encoded = handler.encode(meta).unwrap();
        assert_eq!(&handler.decode(&encoded).unwrap(), meta);
    }
}
