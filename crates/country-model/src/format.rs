//! Well-known format names.
//!
//! A standard declares which of these (or any other names) its entries carry,
//! see [`StandardInfo::format_names`](crate::StandardInfo::format_names).

/// Two-letter code, e.g. `AF`.
pub const ALPHA_2: &str = "alpha2";

/// Three-letter code, e.g. `AFG`.
pub const ALPHA_3: &str = "alpha3";

/// Three-digit numeric code, e.g. `004`.
pub const NUMERIC: &str = "numeric";
