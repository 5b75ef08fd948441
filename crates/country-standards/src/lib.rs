#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod fips;
pub mod genc;
pub mod iso;
pub mod memory;
pub mod registry;
pub mod source;
pub mod traits;

pub use crate::error::{Result, StandardsError};
pub use crate::fips::Fips104Standard;
pub use crate::genc::GencStandard;
pub use crate::iso::Iso3166Standard;
pub use crate::memory::MemoryStandard;
pub use crate::registry::StandardRegistry;
pub use crate::source::SourceText;
pub use crate::traits::{Entries, Standard};
