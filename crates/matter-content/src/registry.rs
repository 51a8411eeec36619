//! Ordered handler registry and format detection
//!
//! Order is priority: the first handler whose boundary matches the start
//! of a document wins. The registry does not check that boundaries are
//! disjoint; whoever assembles it decides what an ambiguous document means.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use matter_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::{Delimiters, Format, HandlerRef};
use crate::handlers::{TomlHandler, YamlHandler};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// Return the first handler that detects frontmatter in `text`.
///
/// `None` is a normal outcome: plain documents have no frontmatter.
pub fn detect_format<'h>(text: &str, handlers: &'h [HandlerRef]) -> Option<&'h HandlerRef> {
    handlers.iter().find(|handler| handler.detect(text))
}

/// Ordered list of frontmatter handlers.
///
/// # Example
///
/// ```
/// use matter_content::{Format, Registry};
///
/// let registry = Registry::with_builtins();
/// let handler = registry.detect("+++\ntitle = \"x\"\n+++\nbody").unwrap();
/// assert_eq!(handler.format(), Format::Toml);
/// assert!(registry.detect("just text").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    handlers: Vec<HandlerRef>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// YAML first, then TOML.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(YamlHandler::new());
        registry.register(TomlHandler::new());
        registry
    }

    /// The process-wide built-in registry. Never mutated after creation.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Build a registry from configuration, in the listed order.
    ///
    /// An empty handler list yields the built-ins.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        if config.handlers.is_empty() {
            return Ok(Self::with_builtins());
        }

        let mut registry = Self::new();
        for handler in &config.handlers {
            match handler.format {
                Format::Yaml => registry.register(YamlHandler::from_config(handler)?),
                Format::Toml => registry.register(TomlHandler::from_config(handler)?),
            };
        }
        Ok(registry)
    }

    /// Append a handler at the lowest priority and return its shared handle.
    pub fn register<H>(&mut self, handler: H) -> HandlerRef
    where
        H: crate::FrontmatterHandler + 'static,
    {
        self.register_shared(Arc::new(handler))
    }

    /// Append an already shared handler.
    pub fn register_shared(&mut self, handler: HandlerRef) -> HandlerRef {
        self.handlers.push(Arc::clone(&handler));
        handler
    }

    /// First handler detecting frontmatter in `text`.
    pub fn detect(&self, text: &str) -> Option<&HandlerRef> {
        detect_format(text, &self.handlers)
    }

    /// First registered handler for `format`.
    pub fn get(&self, format: Format) -> Option<&HandlerRef> {
        self.handlers.iter().find(|h| h.format() == format)
    }

    pub fn handlers(&self) -> &[HandlerRef] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Delimiter settings for one handler.
///
/// Unset fields keep the format's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    pub format: Format,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_delimiter: Option<String>,
}

impl HandlerConfig {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            boundary: None,
            start_delimiter: None,
            end_delimiter: None,
        }
    }

    /// Overlay the configured values on `defaults`.
    ///
    /// A configured start delimiter without an end delimiter is used for
    /// both.
    pub fn delimiters_over(&self, defaults: Delimiters) -> Result<Delimiters> {
        if self.boundary.is_none() && self.start_delimiter.is_none() && self.end_delimiter.is_none()
        {
            return Ok(defaults);
        }

        let start = self
            .start_delimiter
            .clone()
            .unwrap_or_else(|| defaults.start().to_string());
        let end = match (&self.end_delimiter, &self.start_delimiter) {
            (Some(end), _) => end.clone(),
            (None, Some(start)) => start.clone(),
            (None, None) => defaults.end().to_string(),
        };
        let boundary = self
            .boundary
            .clone()
            .unwrap_or_else(|| defaults.boundary().as_str().to_string());

        Delimiters::builder()
            .boundary(boundary)
            .start(start)
            .end(end)
            .build()
    }
}

/// Handler list as read from a config file.
///
/// ```toml
/// [[handlers]]
/// format = "toml"
///
/// [[handlers]]
/// format = "yaml"
/// boundary = '^\.{3,}\s*$'
/// start_delimiter = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

impl RegistryConfig {
    /// Load from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), "loaded handler registry config");
        Ok(config)
    }

    /// Save atomically; format follows the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.detect("---\na: 1\n---\n").is_none());
    }

    #[test]
    fn test_with_builtins_order() {
        let registry = Registry::with_builtins();
        let formats: Vec<_> = registry.handlers().iter().map(|h| h.format()).collect();
        assert_eq!(formats, vec![Format::Yaml, Format::Toml]);
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = Registry::new();
        let dots = Delimiters::builder()
            .boundary(r"^-{3,}\s*$")
            .start("---")
            .build()
            .unwrap();
        let toml_on_dashes = registry.register(TomlHandler::with_delimiters(dots));
        registry.register(YamlHandler::new());

        let found = registry.detect("---\na = 1\n---\n").unwrap();
        assert!(Arc::ptr_eq(found, &toml_on_dashes));
    }

    #[test]
    fn test_get_by_format() {
        let registry = Registry::with_builtins();
        assert_eq!(registry.get(Format::Toml).unwrap().format(), Format::Toml);
        assert!(Registry::new().get(Format::Yaml).is_none());
    }

    #[test]
    fn test_handler_config_overlay() {
        let config = HandlerConfig {
            start_delimiter: Some("...".into()),
            boundary: Some(r"^\.{3,}\s*$".into()),
            ..HandlerConfig::new(Format::Yaml)
        };
        let delimiters = config
            .delimiters_over(Format::Yaml.default_delimiters())
            .unwrap();
        assert_eq!(delimiters.start(), "...");
        assert_eq!(delimiters.end(), "...");
        assert!(delimiters.matches_start("...\na: 1\n...\n"));
    }

    #[test]
    fn test_handler_config_bad_pattern() {
        let config = HandlerConfig {
            boundary: Some("(".into()),
            ..HandlerConfig::new(Format::Toml)
        };
        let err = Registry::from_config(&RegistryConfig {
            handlers: vec![config],
        })
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_empty_config_yields_builtins() {
        let registry = Registry::from_config(&RegistryConfig::default()).unwrap();
        assert_eq!(registry.len(), 2);
    }
}
