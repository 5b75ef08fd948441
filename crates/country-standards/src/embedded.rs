//! Embedded standards data.
//!
//! Source files for the built-in standards are embedded at compile time
//! using `include_str!()`, so the built-in registry needs no file I/O.

/// ISO 3166-1 codes (JSON array of `name`, `alpha2`, `alpha3`, `numeric`).
pub const ISO_3166_1_FILE: &str = "iso3166-1.json";
pub const ISO_3166_1: &str = include_str!("../data/iso3166-1.json");

/// FIPS 10-4 codes (JSON array of `alpha2Code`, `shortName`).
pub const FIPS_10_4_FILE: &str = "fips_codes.json";
pub const FIPS_10_4: &str = include_str!("../data/fips_codes.json");

/// GENC 3.0.0 baseline (XML `GeopoliticalEntityEntry` elements).
pub const GENC_3_0_0_FILE: &str = "genc_3_0_0.xml";
pub const GENC_3_0_0: &str = include_str!("../data/genc_3_0_0.xml");
