//! Mapping table compiled into the crate.

/// Name reported for the embedded table in diagnostics.
pub const MAPPINGS_FILE: &str = "mappings.csv";

/// ISO 3166-1 alpha-3, FIPS 10-4 alpha-2 and GENC alpha-3 correspondences.
pub const MAPPINGS: &str = include_str!("../data/mappings.csv");
