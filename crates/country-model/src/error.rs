use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("standard name must not be empty")]
    EmptyStandardName,

    #[error("country code of standard {standard} must have a non-empty name")]
    EmptyName { standard: String },

    #[error("format '{format}' is not supported by standard {standard}")]
    UnknownFormat { standard: String, format: String },

    #[error("invalid standard key '{0}': expected NAME or NAME:VERSION")]
    InvalidStandardKey(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
