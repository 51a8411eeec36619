//! Where documents are read from and written to

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Input for [`crate::load`]: a path to open, or a stream already open.
///
/// Paths are opened and closed internally on every exit path; streams are
/// read to the end and left to the caller.
pub enum Source<'a> {
    Path(&'a Path),
    Reader(&'a mut dyn Read),
}

impl<'a> Source<'a> {
    pub fn reader(reader: &'a mut dyn Read) -> Self {
        Self::Reader(reader)
    }

    pub(crate) fn read_text(self) -> Result<String> {
        match self {
            Self::Path(path) => Ok(matter_fs::io::read_text(path)?),
            Self::Reader(reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::Path(path.as_path())
    }
}

/// A bare string is a file name, never document text.
impl<'a> From<&'a str> for Source<'a> {
    fn from(path: &'a str) -> Self {
        Self::Path(Path::new(path))
    }
}

/// Output for [`crate::dump`]: a path to replace, or a stream already open.
///
/// Paths are written atomically; streams are written and flushed.
pub enum Destination<'a> {
    Path(&'a Path),
    Writer(&'a mut dyn Write),
}

impl<'a> Destination<'a> {
    pub fn writer(writer: &'a mut dyn Write) -> Self {
        Self::Writer(writer)
    }

    pub(crate) fn write_text(self, text: &str) -> Result<()> {
        match self {
            Self::Path(path) => Ok(matter_fs::io::write_text(path, text)?),
            Self::Writer(writer) => {
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
                Ok(())
            }
        }
    }
}

impl<'a> From<&'a Path> for Destination<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Destination<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::Path(path.as_path())
    }
}

impl<'a> From<&'a str> for Destination<'a> {
    fn from(path: &'a str) -> Self {
        Self::Path(Path::new(path))
    }
}
