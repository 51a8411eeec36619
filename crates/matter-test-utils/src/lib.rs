//! Shared test utilities for the frontmatter workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - canned documents in each frontmatter format
//! - [`dir`] - [`TestDir`] for documents on disk
//! - [`logging`] - opt-in tracing output for tests

pub mod dir;
pub mod fixtures;
pub mod logging;

pub use dir::TestDir;
