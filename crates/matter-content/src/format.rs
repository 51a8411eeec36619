//! Frontmatter formats, delimiters, and the handler trait

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::Metadata;

static YAML_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| compile_boundary(r"^-{3,}\s*$").expect("Invalid YAML boundary regex"));

static TOML_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| compile_boundary(r"^\+{3,}\s*$").expect("Invalid TOML boundary regex"));

/// Supported frontmatter formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[serde(alias = "yml")]
    Yaml,
    Toml,
}

impl Format {
    /// Human-readable format name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    /// Look up a format by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detect format from a standalone metadata file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::from_name(ext.trim_start_matches('.'))
    }

    /// The delimiters this format uses when none are configured
    pub fn default_delimiters(&self) -> Delimiters {
        match self {
            Self::Yaml => Delimiters {
                boundary: YAML_BOUNDARY.clone(),
                start: "---".into(),
                end: "---".into(),
            },
            Self::Toml => Delimiters {
                boundary: TOML_BOUNDARY.clone(),
                start: "+++".into(),
                end: "+++".into(),
            },
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn compile_boundary(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).multi_line(true).build()
}

/// Boundary pattern plus the literal delimiters written on output.
///
/// The boundary is matched in multi-line mode, so `^` and `$` anchor to
/// line starts and ends.
#[derive(Debug, Clone)]
pub struct Delimiters {
    boundary: Regex,
    start: String,
    end: String,
}

impl Delimiters {
    pub fn builder() -> DelimitersBuilder {
        DelimitersBuilder::default()
    }

    pub fn boundary(&self) -> &Regex {
        &self.boundary
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// True iff a boundary line begins at the very first byte of `text`.
    pub fn matches_start(&self, text: &str) -> bool {
        self.boundary.find(text).is_some_and(|m| m.start() == 0)
    }

    /// Split on the first two boundary lines.
    ///
    /// Returns the block between them and everything after the second one.
    /// Whatever precedes the first boundary is dropped. `None` when fewer
    /// than two boundaries exist.
    pub fn split<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str)> {
        let mut parts = self.boundary.splitn(text, 3);
        let _leading = parts.next()?;
        let frontmatter = parts.next()?;
        let content = parts.next()?;
        Some((frontmatter, content))
    }
}

/// Builder for [`Delimiters`].
///
/// A boundary pattern and a start delimiter are required; the end
/// delimiter defaults to the start delimiter.
#[derive(Debug, Default, Clone)]
pub struct DelimitersBuilder {
    boundary: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

impl DelimitersBuilder {
    pub fn boundary(mut self, pattern: impl Into<String>) -> Self {
        self.boundary = Some(pattern.into());
        self
    }

    pub fn start(mut self, delimiter: impl Into<String>) -> Self {
        self.start = Some(delimiter.into());
        self
    }

    pub fn end(mut self, delimiter: impl Into<String>) -> Self {
        self.end = Some(delimiter.into());
        self
    }

    pub fn build(self) -> Result<Delimiters> {
        let pattern = self
            .boundary
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::configuration("no frontmatter boundary pattern defined"))?;

        let boundary = compile_boundary(&pattern).map_err(|e| {
            Error::configuration(format!("invalid boundary pattern `{pattern}`: {e}"))
        })?;

        let start = self
            .start
            .ok_or_else(|| Error::configuration("no start delimiter defined"))?;
        let end = self.end.unwrap_or_else(|| start.clone());

        Ok(Delimiters {
            boundary,
            start,
            end,
        })
    }
}

/// Per-call overrides for [`FrontmatterHandler::render`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub start_delimiter: Option<String>,
    pub end_delimiter: Option<String>,
}

impl FormatOptions {
    pub fn with_delimiters(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_delimiter: Some(start.into()),
            end_delimiter: Some(end.into()),
        }
    }
}

/// Shared handle to a handler, as held by a [`crate::Registry`].
pub type HandlerRef = Arc<dyn FrontmatterHandler>;

/// Trait for format-specific frontmatter handlers.
///
/// Handlers are immutable once built, so one instance can serve any
/// number of threads.
pub trait FrontmatterHandler: fmt::Debug + Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Boundary pattern and output delimiters
    fn delimiters(&self) -> &Delimiters;

    /// Decode a frontmatter block into metadata
    fn decode(&self, frontmatter: &str) -> Result<Metadata>;

    /// Encode metadata as frontmatter text, without delimiters
    fn encode(&self, metadata: &Metadata) -> Result<String>;

    /// Whether `text` opens with this handler's boundary line
    fn detect(&self, text: &str) -> bool {
        self.delimiters().matches_start(text)
    }

    /// Split `text` into `(frontmatter, content)`
    fn split<'a>(&self, text: &'a str) -> Result<(&'a str, &'a str)> {
        self.delimiters().split(text).ok_or_else(|| {
            Error::format(
                self.format().name(),
                "expected opening and closing frontmatter boundaries",
            )
        })
    }

    /// Render a whole document: delimited metadata, blank line, content.
    fn render(&self, document: &Document, options: &FormatOptions) -> Result<String> {
        let delimiters = self.delimiters();
        let start = options.start_delimiter.as_deref().unwrap_or(delimiters.start());
        let end = options.end_delimiter.as_deref().unwrap_or(delimiters.end());

        let metadata = self.encode(&document.metadata)?;
        let rendered = format!("{start}\n{metadata}\n{end}\n\n{}\n", document.content);

        Ok(rendered.trim().to_string())
    }
}
