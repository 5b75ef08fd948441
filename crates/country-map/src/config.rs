//! Converter configuration.

use std::borrow::Cow;
use std::path::PathBuf;

use country_model::StandardKey;

use crate::embedded;
use crate::error::{MappingError, Result};

/// Environment variable naming a mapping table that replaces the embedded one.
pub const MAPPINGS_ENV_VAR: &str = "COUNTRYCODE_MAPPINGS";

/// Where the mapping table is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MappingSource {
    /// The table bundled with this crate.
    #[default]
    Embedded,
    /// A table on disk.
    File(PathBuf),
    /// A table held in memory; `name` is used in diagnostics.
    Text { name: String, content: String },
}

impl MappingSource {
    /// Name of the table as shown in logs and errors.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded => Cow::Borrowed(embedded::MAPPINGS_FILE),
            Self::File(path) => path.to_string_lossy(),
            Self::Text { name, .. } => Cow::Borrowed(name.as_str()),
        }
    }

    /// Read the table text. Only [`MappingSource::File`] performs I/O.
    pub fn read(&self) -> Result<Cow<'_, str>> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(embedded::MAPPINGS)),
            Self::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| MappingError::Io {
                    path: path.clone(),
                    source,
                }),
            Self::Text { content, .. } => Ok(Cow::Borrowed(content.as_str())),
        }
    }
}

/// How problems in a table's header lines are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Any malformed token, unknown standard or invalid join field aborts loading.
    #[default]
    Strict,
    /// Unknown standards and invalid join fields drop their column; loading
    /// continues while at least two columns remain. Malformed tokens still abort.
    Lenient,
}

/// Options for building a [`CountryCodeConverter`](crate::CountryCodeConverter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Standard used by the `*_default_standard` conversions.
    pub default_standard: StandardKey,
    pub mappings: MappingSource,
    pub header_mode: HeaderMode,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_standard: StandardKey::exact(
                country_standards::iso::NAME,
                Some(country_standards::iso::VERSION),
            ),
            mappings: MappingSource::Embedded,
            header_mode: HeaderMode::Strict,
        }
    }
}

impl ConverterConfig {
    /// Default configuration, reading the table named by `COUNTRYCODE_MAPPINGS`
    /// when that variable is set and non-empty.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(MAPPINGS_ENV_VAR) {
            Some(path) if !path.is_empty() => config.with_mappings(MappingSource::File(path.into())),
            _ => config,
        }
    }

    pub fn with_default_standard(mut self, key: StandardKey) -> Self {
        self.default_standard = key;
        self
    }

    pub fn with_mappings(mut self, source: MappingSource) -> Self {
        self.mappings = source;
        self
    }

    pub fn with_header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }

    pub fn lenient(self) -> Self {
        self.with_header_mode(HeaderMode::Lenient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_embedded_iso() {
        let config = ConverterConfig::default();
        assert_eq!(config.default_standard.to_string(), "ISO:2020");
        assert_eq!(config.mappings, MappingSource::Embedded);
        assert_eq!(config.header_mode, HeaderMode::Strict);
    }

    #[test]
    fn source_names() {
        assert_eq!(MappingSource::Embedded.name(), "mappings.csv");
        let text = MappingSource::Text {
            name: "inline".to_string(),
            content: String::new(),
        };
        assert_eq!(text.name(), "inline");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = MappingSource::File(dir.path().join("absent.csv"));
        assert!(matches!(source.read(), Err(MappingError::Io { .. })));
    }
}
