//! Parse text into documents and serialize documents back to text
//!
//! Per call: detect a handler (unless one is given), split, decode, and
//! merge over the caller's defaults. Any split or decode failure drops to
//! "no frontmatter": defaults as metadata, the whole trimmed text as
//! content. Nothing in this path returns a format error.

use crate::document::Document;
use crate::error::Result;
use crate::format::{FormatOptions, FrontmatterHandler, HandlerRef};
use crate::handlers::YamlHandler;
use crate::registry::Registry;
use crate::source::{Destination, Source};
use crate::value::Metadata;

/// Parse/serialize entry points bound to a handler registry.
///
/// The free functions in this module use [`Registry::global`].
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(Registry::global())
    }
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Split `text` into `(metadata, content)`.
    ///
    /// `defaults` seed the metadata and lose to any key found in the
    /// frontmatter. An explicit `handler` skips detection.
    pub fn parse(
        &self,
        text: &str,
        defaults: &Metadata,
        handler: Option<&HandlerRef>,
    ) -> (Metadata, String) {
        let (metadata, content, _) = self.resolve_and_parse(text, defaults, handler);
        (metadata, content)
    }

    /// Like [`Parser::parse`], for raw bytes. Only UTF-8 is accepted.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        defaults: &Metadata,
        handler: Option<&HandlerRef>,
    ) -> Result<(Metadata, String)> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.parse(text, defaults, handler))
    }

    /// Parse `text` into a [`Document`] linked to the resolved handler.
    pub fn loads(&self, text: &str, defaults: &Metadata, handler: Option<&HandlerRef>) -> Document {
        let (metadata, content, handler) = self.resolve_and_parse(text, defaults, handler);

        let mut document = Document::with_metadata(content, metadata);
        document.set_handler(handler.as_ref());
        document
    }

    /// Read a whole source and parse it.
    pub fn load<'s>(
        &self,
        source: impl Into<Source<'s>>,
        defaults: &Metadata,
        handler: Option<&HandlerRef>,
    ) -> Result<Document> {
        let text = source.into().read_text()?;
        Ok(self.loads(&text, defaults, handler))
    }

    /// Whether a registered handler recognises frontmatter in `text`.
    pub fn checks(&self, text: &str) -> bool {
        self.registry.detect(text.trim()).is_some()
    }

    /// [`Parser::checks`] over a whole source.
    pub fn check<'s>(&self, source: impl Into<Source<'s>>) -> Result<bool> {
        let text = source.into().read_text()?;
        Ok(self.checks(&text))
    }

    /// Trim, pick a handler, parse. Also returns the handler for linking.
    fn resolve_and_parse(
        &self,
        text: &str,
        defaults: &Metadata,
        handler: Option<&HandlerRef>,
    ) -> (Metadata, String, Option<HandlerRef>) {
        let text = text.trim();
        let handler = self.resolve(text, handler);
        let (metadata, content) = parse_with(text, defaults.clone(), handler.as_deref());
        (metadata, content, handler)
    }

    fn resolve(&self, text: &str, handler: Option<&HandlerRef>) -> Option<HandlerRef> {
        let resolved = handler.or_else(|| self.registry.detect(text)).cloned();
        match &resolved {
            Some(handler) => tracing::trace!(format = %handler.format(), "resolved frontmatter handler"),
            None => tracing::debug!("no frontmatter handler detected"),
        }
        resolved
    }
}

fn parse_with(
    text: &str,
    mut metadata: Metadata,
    handler: Option<&dyn FrontmatterHandler>,
) -> (Metadata, String) {
    let Some(handler) = handler else {
        return (metadata, text.to_string());
    };

    match split_and_decode(handler, text) {
        Ok((frontmatter, content)) => {
            metadata.extend(frontmatter);
            (metadata, content.trim().to_string())
        }
        Err(error) => {
            tracing::debug!(
                format = %handler.format(),
                %error,
                "treating document as having no frontmatter"
            );
            (metadata, text.to_string())
        }
    }
}

fn split_and_decode<'a>(
    handler: &dyn FrontmatterHandler,
    text: &'a str,
) -> Result<(Metadata, &'a str)> {
    let (frontmatter, content) = handler.split(text)?;
    let metadata = handler.decode(frontmatter)?;
    Ok((metadata, content))
}

/// Render `document` as delimited frontmatter followed by its content.
///
/// Uses `handler` if given, else the document's own handler, else YAML.
/// Fails only if the metadata cannot be expressed in that format.
pub fn dumps(
    document: &Document,
    handler: Option<&HandlerRef>,
    options: &FormatOptions,
) -> Result<String> {
    match handler.cloned().or_else(|| document.handler()) {
        Some(handler) => handler.render(document, options),
        None => YamlHandler::new().render(document, options),
    }
}

/// [`dumps`], then write the text to `destination`.
pub fn dump<'d>(
    document: &Document,
    destination: impl Into<Destination<'d>>,
    handler: Option<&HandlerRef>,
    options: &FormatOptions,
) -> Result<()> {
    let text = dumps(document, handler, options)?;
    destination.into().write_text(&text)
}

/// Parse with the global registry. See [`Parser::parse`].
pub fn parse(text: &str, defaults: &Metadata, handler: Option<&HandlerRef>) -> (Metadata, String) {
    Parser::default().parse(text, defaults, handler)
}

/// Parse bytes with the global registry. See [`Parser::parse_bytes`].
pub fn parse_bytes(
    bytes: &[u8],
    defaults: &Metadata,
    handler: Option<&HandlerRef>,
) -> Result<(Metadata, String)> {
    Parser::default().parse_bytes(bytes, defaults, handler)
}

/// See [`Parser::loads`].
pub fn loads(text: &str, defaults: &Metadata, handler: Option<&HandlerRef>) -> Document {
    Parser::default().loads(text, defaults, handler)
}

/// See [`Parser::load`].
pub fn load<'s>(
    source: impl Into<Source<'s>>,
    defaults: &Metadata,
    handler: Option<&HandlerRef>,
) -> Result<Document> {
    Parser::default().load(source, defaults, handler)
}

/// See [`Parser::checks`].
pub fn checks(text: &str) -> bool {
    Parser::default().checks(text)
}

/// See [`Parser::check`].
pub fn check<'s>(source: impl Into<Source<'s>>) -> Result<bool> {
    Parser::default().check(source)
}
