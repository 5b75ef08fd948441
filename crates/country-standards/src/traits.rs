//! The provider interface every country code standard implements.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use country_model::{CountryCode, StandardInfo};

use crate::error::Result;

/// Shared, immutable entry set of one standard.
pub type Entries = Arc<[Arc<CountryCode>]>;

/// A country code standard such as ISO 3166-1, FIPS 10-4 or GENC.
///
/// Every entry returned by [`entries`](Standard::entries) must belong to
/// [`info`](Standard::info). Implementations load their entries once; later
/// calls return the same shared set.
pub trait Standard: fmt::Debug + Send + Sync {
    /// Descriptor of this standard.
    fn info(&self) -> &Arc<StandardInfo>;

    /// All entries of this standard.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data cannot be read or parsed.
    fn entries(&self) -> Result<Entries>;
}

/// Load-once cell for a provider's entries.
///
/// Concurrent first calls may each parse the source, but only one result is
/// ever stored and every caller observes that one.
#[derive(Debug, Default)]
pub(crate) struct EntryCache(OnceLock<Entries>);

impl EntryCache {
    pub(crate) fn get_or_load<F>(&self, info: &StandardInfo, load: F) -> Result<Entries>
    where
        F: FnOnce() -> Result<Vec<CountryCode>>,
    {
        if let Some(entries) = self.0.get() {
            return Ok(Arc::clone(entries));
        }
        let loaded = finish_entries(info, load()?);
        Ok(Arc::clone(self.0.get_or_init(|| loaded)))
    }
}

/// Freeze parsed entries, warning about format values shared by several entries.
pub(crate) fn finish_entries(info: &StandardInfo, codes: Vec<CountryCode>) -> Entries {
    if codes.is_empty() {
        tracing::debug!(standard = %info, "standard data contained no codes; provider is empty");
    }

    let duplicates = warn_duplicates(info, &codes);

    tracing::debug!(
        standard = %info,
        entries = codes.len(),
        duplicates,
        "loaded standard entries"
    );

    codes.into_iter().map(Arc::new).collect()
}

fn warn_duplicates(info: &StandardInfo, codes: &[CountryCode]) -> usize {
    let mut seen: BTreeMap<(&str, &str), &str> = BTreeMap::new();
    let mut duplicates = 0;
    for code in codes {
        for (format, value) in code.formats() {
            if let Some(first) = seen.insert((format.as_str(), value.as_str()), code.name()) {
                duplicates += 1;
                tracing::warn!(
                    standard = %info,
                    format = %format,
                    value = %value,
                    first = %first,
                    second = %code.name(),
                    "format value is shared by more than one entry"
                );
            }
        }
    }
    duplicates
}
