//! Raw text backing a standard provider.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Result, StandardsError};

/// Content of a standard's data file plus the name used in diagnostics.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub file: Cow<'static, str>,
    pub content: Cow<'static, str>,
}

impl SourceText {
    /// Data compiled into the binary.
    pub const fn embedded(file: &'static str, content: &'static str) -> Self {
        Self {
            file: Cow::Borrowed(file),
            content: Cow::Borrowed(content),
        }
    }

    /// Data supplied by the caller.
    pub fn text(file: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file: Cow::Owned(file.into()),
            content: Cow::Owned(content.into()),
        }
    }

    /// Read a data file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Ok(Self::text(path.display().to_string(), content))
    }
}
