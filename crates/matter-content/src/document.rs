//! The parsed unit: body content plus metadata

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::{Error, Result};
use crate::format::{Format, FrontmatterHandler, HandlerRef};
use crate::value::{Metadata, Value};

/// Body content, metadata, and a weak link to the handler it came from.
///
/// The handler link only picks the default output format for
/// [`crate::dumps`]; it never keeps a handler alive, and a dead or missing
/// link falls back to YAML.
///
/// # Examples
///
/// ```
/// use matter_content::{Document, Error};
/// use serde_json::json;
///
/// let mut doc = Document::new("Body text.");
/// doc.insert("title", "Hello");
/// assert_eq!(doc.get("title"), Some(&json!("Hello")));
///
/// doc.remove("title").unwrap();
/// assert!(!doc.contains_key("title"));
/// assert!(matches!(doc.remove("title"), Err(Error::KeyNotFound { .. })));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub content: String,
    pub metadata: Metadata,
    handler: Option<Weak<dyn FrontmatterHandler>>,
}

/// Alias kept for callers that think of documents as posts.
pub type Post = Document;

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
            handler: None,
        }
    }

    /// Remember `handler` as this document's format, without owning it.
    pub fn with_handler(mut self, handler: &HandlerRef) -> Self {
        self.set_handler(Some(handler));
        self
    }

    pub fn set_handler(&mut self, handler: Option<&HandlerRef>) {
        self.handler = handler.map(Arc::downgrade);
    }

    /// The originating handler, if one was recorded and is still alive.
    pub fn handler(&self) -> Option<HandlerRef> {
        self.handler.as_ref()?.upgrade()
    }

    pub fn format(&self) -> Option<Format> {
        self.handler().map(|h| h.format())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Like [`Document::get`], but a missing key is an error.
    pub fn try_get(&self, key: &str) -> Result<&Value> {
        self.metadata.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Value for `key`, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.metadata.get(key).unwrap_or(default)
    }

    /// Set `key`, returning the previous value. Existing keys keep their
    /// position; new keys go last.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.metadata.insert(key.into(), value.into())
    }

    /// Remove `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.metadata.shift_remove(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.metadata.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.metadata.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.metadata.iter()
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Metadata plus a synthetic `content` entry.
    ///
    /// The entry is added to the returned copy only; a metadata key named
    /// `content` is shadowed there and left untouched on the document.
    pub fn to_dict(&self) -> Metadata {
        let mut dict = self.metadata.clone();
        dict.insert("content".to_string(), Value::String(self.content.clone()));
        dict
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// Documents are equal when content and metadata are; the handler link
/// is not compared.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content && self.metadata == other.metadata
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
