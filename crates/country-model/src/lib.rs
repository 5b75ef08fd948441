//! Shared types for country code conversion.
//!
//! - [`StandardInfo`]: a standard's name, version, publish date and formats
//! - [`StandardKey`]: a textual `NAME[:VERSION]` reference to a standard
//! - [`CountryCode`]: one territory's entry within a standard
//! - format name constants ([`ALPHA_2`], [`ALPHA_3`], [`NUMERIC`])

#![deny(unsafe_code)]

pub mod code;
pub mod error;
pub mod format;
pub mod standard;

pub use code::{CodeSet, CountryCode};
pub use error::{ModelError, Result};
pub use format::{ALPHA_2, ALPHA_3, NUMERIC};
pub use standard::{StandardInfo, StandardKey, VersionSpec};
