//! Country code mapping engine.
//!
//! A mapping table declares which standards take part and which format of
//! each is used as its join key, then lists rows of corresponding codes.
//! [`load_table`] parses such a table, [`MappingIndex`] answers lookups over
//! its rows and [`CountryCodeConverter`] is the public conversion API.

#![deny(unsafe_code)]

pub mod config;
pub mod converter;
pub mod embedded;
pub mod error;
pub mod index;
pub mod table;

pub use crate::config::{ConverterConfig, HeaderMode, MAPPINGS_ENV_VAR, MappingSource};
pub use crate::converter::CountryCodeConverter;
pub use crate::error::{ConvertError, HeaderProblem, MappingError, Result};
pub use crate::index::MappingIndex;
pub use crate::table::{
    LoadReport, MappingRow, MappingTable, RowEntry, RowFailure, RowProblem, StandardFieldBinding,
    load_table,
};
