//! Library components of the `countrycode` binary.

pub mod logging;
pub mod render;
