//! Filesystem plumbing for frontmatter documents
//!
//! Provides whole-file text reads, atomic locked writes, and
//! format-agnostic configuration loading.

pub mod config;
pub mod error;
pub mod io;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
