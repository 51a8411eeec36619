//! Error types for matter-content

/// Result type for matter-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in matter-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A handler was assembled without a usable boundary pattern or delimiter.
    #[error("Invalid handler configuration: {message}")]
    Configuration { message: String },

    /// Frontmatter could not be split, decoded, or encoded.
    ///
    /// [`crate::parse`] absorbs this into the no-frontmatter fallback; it only
    /// reaches callers of the handler methods and of [`crate::dumps`].
    #[error("Malformed {format} frontmatter: {message}")]
    Format { format: String, message: String },

    #[error("Metadata key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] matter_fs::Error),
}

impl Error {
    pub fn format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for failures reading or writing a source or destination,
    /// whether it was a caller-supplied stream or a path opened internally.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Fs(matter_fs::Error::Io { .. }))
    }
}
