//! YAML frontmatter handler using serde_yaml

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::format::{Delimiters, Format, FrontmatterHandler};
use crate::registry::HandlerConfig;
use crate::value::{self, Metadata, Value};

/// Handler for YAML frontmatter between `---` lines.
///
/// Decoding accepts plain YAML data only. Tagged nodes (`!tag value`) are
/// rejected rather than interpreted, so a document can never ask for
/// anything other than strings, numbers, booleans, nulls, lists and maps.
#[derive(Debug, Clone)]
pub struct YamlHandler {
    delimiters: Delimiters,
}

impl Default for YamlHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlHandler {
    pub fn new() -> Self {
        Self::with_delimiters(Format::Yaml.default_delimiters())
    }

    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    /// Build from configuration, falling back to `---` for anything unset.
    pub fn from_config(config: &HandlerConfig) -> Result<Self> {
        Ok(Self::with_delimiters(
            config.delimiters_over(Format::Yaml.default_delimiters())?,
        ))
    }
}

impl FrontmatterHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    fn decode(&self, frontmatter: &str) -> Result<Metadata> {
        if frontmatter.trim().is_empty() {
            return Ok(Metadata::new());
        }
        let yaml: YamlValue =
            serde_yaml::from_str(frontmatter).map_err(|e| Error::format("YAML", e.to_string()))?;
        Ok(value::into_metadata(Format::Yaml, yaml_to_value(&yaml)?))
    }

    fn encode(&self, metadata: &Metadata) -> Result<String> {
        let rendered =
            serde_yaml::to_string(metadata).map_err(|e| Error::format("YAML", e.to_string()))?;
        Ok(rendered.trim().to_string())
    }
}

fn yaml_to_value(yaml: &YamlValue) -> Result<Value> {
    Ok(match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| Error::format("YAML", format!("unsupported number {n}")))?
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => {
            Value::Array(items.iter().map(yaml_to_value).collect::<Result<_>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut map = Metadata::new();
            for (key, item) in mapping {
                map.insert(yaml_key(key)?, yaml_to_value(item)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => {
            return Err(Error::format(
                "YAML",
                format!("tagged value {} is not allowed", tagged.tag),
            ));
        }
    })
}

fn yaml_key(key: &YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        _ => Err(Error::format("YAML", "mapping keys must be scalars")),
    }
}
