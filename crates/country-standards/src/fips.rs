//! FIPS 10-4 provider backed by a JSON code list.

use std::sync::Arc;

use chrono::NaiveDate;
use country_model::{ALPHA_2, CountryCode, StandardInfo};
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::source::SourceText;
use crate::traits::{Entries, EntryCache, Standard};

pub const NAME: &str = "FIPS";
pub const VERSION: &str = "2014";

/// Descriptor of the bundled FIPS 10-4 list.
pub fn info() -> Result<StandardInfo> {
    let published = NaiveDate::from_ymd_opt(2014, 9, 30).unwrap_or_default();
    Ok(StandardInfo::new(NAME, Some(VERSION), published, [ALPHA_2])?)
}

/// FIPS 10-4 country codes. FIPS only defines two-letter codes.
#[derive(Debug)]
pub struct Fips104Standard {
    info: Arc<StandardInfo>,
    source: SourceText,
    cache: EntryCache,
}

impl Fips104Standard {
    pub fn embedded() -> Result<Self> {
        Self::with_source(
            info()?,
            SourceText::embedded(embedded::FIPS_10_4_FILE, embedded::FIPS_10_4),
        )
    }

    pub fn with_source(info: StandardInfo, source: SourceText) -> Result<Self> {
        Ok(Self {
            info: Arc::new(info),
            source,
            cache: EntryCache::default(),
        })
    }
}

impl Standard for Fips104Standard {
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
#[serde(rename_all = "camelCase")]
struct FipsRecord {
    alpha2_code: String,
    short_name: String,
}

fn parse(content: &str, file: &str, info: &Arc<StandardInfo>) -> Result<Vec<CountryCode>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<FipsRecord> =
        serde_json::from_str(content).map_err(|source| StandardsError::Json {
            file: file.to_string(),
            source,
        })?;

    records
        .into_iter()
        .map(|record| {
            CountryCode::new(
                Arc::clone(info),
                record.short_name,
                [(ALPHA_2, record.alpha2_code.trim().to_string())],
            )
            .map_err(StandardsError::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips_differs_from_iso() {
        let standard = Fips104Standard::embedded().unwrap();
        let entries = standard.entries().unwrap();
        let australia = entries
            .iter()
            .find(|c| c.format(ALPHA_2) == Some("AS"))
            .unwrap();
        assert_eq!(australia.name(), "Australia");
        assert!(entries.iter().any(|c| c.name() == "Gaza Strip"));
    }

    #[test]
    fn empty_file_is_an_empty_standard() {
        let standard =
            Fips104Standard::with_source(info().unwrap(), SourceText::text("empty.json", "  \n"))
                .unwrap();
        assert!(standard.entries().unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_a_json_error() {
        let json = r#"[{"alpha2Code": "AF"}]"#;
        let standard =
            Fips104Standard::with_source(info().unwrap(), SourceText::text("fips.json", json))
                .unwrap();
        assert!(matches!(
            standard.entries(),
            Err(StandardsError::Json { .. })
        ));
    }
}
