//! Error types for standard providers and the registry.

use std::path::PathBuf;

use country_model::ModelError;
use thiserror::Error;

/// Errors that can occur when loading or resolving country code standards.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON data file is malformed.
    #[error("failed to parse JSON {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// XML data file is malformed.
    #[error("failed to parse XML {file}: {message}")]
    Xml { file: String, message: String },

    /// An entry or descriptor violated a model constraint.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// An entry handed to a provider belongs to a different standard.
    #[error("entry {entry} belongs to {found}, not {standard}")]
    ForeignEntry {
        standard: String,
        entry: String,
        found: String,
    },

    /// A standard with the same name and version is already registered.
    #[error("standard {standard} is already registered")]
    DuplicateStandard { standard: String },

    /// No registered standard matches.
    #[error("standard {standard} is not registered")]
    StandardNotFound { standard: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for standard operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
