//! Error types for mapping tables and conversions.

use std::fmt;
use std::path::PathBuf;

use country_standards::StandardsError;
use thiserror::Error;

/// Problem found in the two header lines of a mapping table.
///
/// Columns are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeaderProblem {
    /// Token on the standards line is not `NAME:VERSION`.
    MalformedToken { column: usize, token: String },
    /// Token names a standard that is not registered.
    UnknownStandard { column: usize, standard: String },
    /// Join-key field is not a format of its standard.
    UnknownField {
        column: usize,
        standard: String,
        field: String,
    },
}

impl fmt::Display for HeaderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken { column, token } => {
                write!(f, "column {column}: \"{token}\" is not NAME:VERSION")
            }
            Self::UnknownStandard { column, standard } => {
                write!(f, "column {column}: standard {standard} is not registered")
            }
            Self::UnknownField {
                column,
                standard,
                field,
            } => write!(f, "column {column}: {standard} has no format \"{field}\""),
        }
    }
}

/// Fatal errors raised while building a converter.
///
/// No partially loaded converter is ever returned alongside one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error("failed to read mapping table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping table {table}: {message}")]
    Csv { table: String, message: String },

    #[error("mapping table {table} is empty")]
    EmptyTable { table: String },

    #[error("mapping table {table} has an invalid header: {}", join(.problems))]
    Header {
        table: String,
        problems: Vec<HeaderProblem>,
    },

    #[error("mapping table {table} maps {count} standard(s); at least 2 are required")]
    TooFewStandards { table: String, count: usize },

    #[error("mapping table {table} declares {fields} join field(s) for {standards} standard(s)")]
    FieldCountMismatch {
        table: String,
        standards: usize,
        fields: usize,
    },

    #[error("mapping table {table} has no data rows")]
    NoDataRows { table: String },

    #[error("mapping table {table} has no valid rows ({failed} rejected)")]
    NoValidRows { table: String, failed: usize },

    #[error("default standard {standard} is not registered")]
    UnknownDefault { standard: String },

    #[error("default standard {standard} is not mapped by {table}")]
    DefaultNotMapped { standard: String, table: String },

    #[error(transparent)]
    Standards(#[from] StandardsError),
}

fn join(problems: &[HeaderProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by conversion queries.
///
/// A value without a mapping is not an error; it yields an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("standard {standard} is not supported by this converter")]
    UnsupportedStandard { standard: String },
}

/// Result type for building converters.
pub type Result<T> = std::result::Result<T, MappingError>;
