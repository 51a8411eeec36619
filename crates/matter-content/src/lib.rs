//! Frontmatter detection, parsing, and serialization for text documents
//!
//! A document may open with a delimited metadata block:
//!
//! ```text
//! ---
//! title: Hello
//! tags:
//!   - a
//!   - b
//! ---
//!
//! Body text.
//! ```
//!
//! This crate detects which format the block uses (YAML between `---`
//! lines, TOML between `+++` lines), splits it from the body, decodes it
//! into an ordered [`Metadata`] map, and writes a [`Document`] back out in
//! the same delimited form.
//!
//! ```
//! use matter_content::{Metadata, dumps, loads};
//!
//! let doc = loads("---\ntitle: Hello\n---\n\nBody text.", &Metadata::new(), None);
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("Hello"));
//! assert_eq!(doc.content, "Body text.");
//!
//! let text = dumps(&doc, None, &Default::default()).unwrap();
//! assert_eq!(text, "---\ntitle: Hello\n---\n\nBody text.");
//! ```
//!
//! Broken or missing frontmatter never fails [`parse`]: the whole input is
//! returned as content and the caller's defaults as metadata.

pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod parse;
pub mod registry;
pub mod source;
pub mod value;

pub use document::{Document, Post};
pub use error::{Error, Result};
pub use format::{Delimiters, DelimitersBuilder, Format, FormatOptions, FrontmatterHandler, HandlerRef};
pub use handlers::{TomlHandler, YamlHandler};
pub use parse::{Parser, check, checks, dump, dumps, load, loads, parse, parse_bytes};
pub use registry::{HandlerConfig, Registry, RegistryConfig, detect_format};
pub use source::{Destination, Source};
pub use value::{Metadata, Value};
