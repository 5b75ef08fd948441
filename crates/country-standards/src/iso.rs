//! ISO 3166-1 provider backed by a JSON code list.

use std::sync::Arc;

use chrono::NaiveDate;
use country_model::{ALPHA_2, ALPHA_3, CountryCode, NUMERIC, StandardInfo};
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::source::SourceText;
use crate::traits::{Entries, EntryCache, Standard};

pub const NAME: &str = "ISO";
pub const VERSION: &str = "2020";

/// Descriptor of the bundled ISO 3166-1 edition.
pub fn info() -> Result<StandardInfo> {
    let published = NaiveDate::from_ymd_opt(2020, 8, 1).unwrap_or_default();
    Ok(StandardInfo::new(
        NAME,
        Some(VERSION),
        published,
        [ALPHA_2, ALPHA_3, NUMERIC],
    )?)
}

/// ISO 3166-1 country codes read from JSON.
#[derive(Debug)]
pub struct Iso3166Standard {
    info: Arc<StandardInfo>,
    source: SourceText,
    cache: EntryCache,
}

impl Iso3166Standard {
    /// Provider over the embedded code list.
    pub fn embedded() -> Result<Self> {
        Self::with_source(
            info()?,
            SourceText::embedded(embedded::ISO_3166_1_FILE, embedded::ISO_3166_1),
        )
    }

    /// Provider over caller-supplied JSON, described by `info`.
    pub fn with_source(info: StandardInfo, source: SourceText) -> Result<Self> {
        Ok(Self {
            info: Arc::new(info),
            source,
            cache: EntryCache::default(),
        })
    }
}

impl Standard for Iso3166Standard {
    fn info(&self) -> &Arc<StandardInfo> {
        &self.info
    }

    fn entries(&self) -> Result<Entries> {
        self.cache.get_or_load(&self.info, || {
            parse(&self.source.content, &self.source.file, &self.info)
        })
    }
}

#[derive(Debug, Deserialize)]
struct IsoRecord {
    name: String,
    alpha2: String,
    alpha3: String,
    numeric: String,
}

fn parse(content: &str, file: &str, info: &Arc<StandardInfo>) -> Result<Vec<CountryCode>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<IsoRecord> =
        serde_json::from_str(content).map_err(|source| StandardsError::Json {
            file: file.to_string(),
            source,
        })?;

    records
        .into_iter()
        .map(|record| {
            let formats = [
                (ALPHA_2, record.alpha2),
                (ALPHA_3, record.alpha3),
                (NUMERIC, record.numeric),
            ];
            let formats = formats.into_iter().filter(|(_, value)| !value.trim().is_empty());
            CountryCode::new(Arc::clone(info), record.name, formats).map_err(StandardsError::from)
        })
        .collect()
}
