//! Provider over entries supplied by the caller.

use std::sync::Arc;

use country_model::{CountryCode, StandardInfo};

use crate::error::{Result, StandardsError};
use crate::traits::{Entries, Standard, finish_entries};

/// A standard whose entries are already in memory.
///
/// Useful for custom standards and for tests that need a small, fully known
/// entry set.
#[derive(Debug)]
pub struct MemoryStandard {
    info: Arc<StandardInfo>,
    entries: Entries,
}

impl MemoryStandard {
    /// Fails with [`StandardsError::ForeignEntry`] if any entry belongs to
    /// another standard.
    pub fn new(info: Arc<StandardInfo>, codes: Vec<CountryCode>) -> Result<Self> {
        if let Some(foreign) = codes.iter().find(|code| !code.belongs_to(&info)) {
            return Err(StandardsError::ForeignEntry {
                standard: info.to_string(),
                entry: foreign.name().to_string(),
                found: foreign.standard().to_string(),
            });
        }
        let entries = finish_entries(&info, codes);
        Ok(Self { info, entries })
    }

    /// Build entries for `info` from `(name, formats)` pairs.
    pub fn from_records<I, N, F, K, V>(info: Arc<StandardInfo>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, F)>,
        N: Into<String>,
        F: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let codes = records
            .into_iter()
            .map(|(name, formats)| CountryCode::new(Arc::clone(&info), name, formats))
            .collect::<country_model::Result<Vec<_>>>()?;
        Self::new(info, codes)
    }
}

impl Standard for MemoryStandard {
    fn info(&self) -> &Arc<StandardInfo> {
        &self.info
    }

    fn entries(&self) -> Result<Entries> {
        Ok(Arc::clone(&self.entries))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use country_model::ALPHA_2;

    use super::*;

    fn standard(name: &str) -> Arc<StandardInfo> {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        Arc::new(StandardInfo::new(name, Some("1"), date, [ALPHA_2]).unwrap())
    }

    #[test]
    fn holds_given_entries() {
        let info = standard("TEST");
        let memory =
            MemoryStandard::from_records(Arc::clone(&info), [("Aland", [(ALPHA_2, "AX")])])
                .unwrap();
        let entries = memory.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].belongs_to(&info));
    }

    #[test]
    fn rejects_entries_of_another_standard() {
        let other = standard("OTHER");
        let code = CountryCode::new(other, "Aland", [(ALPHA_2, "AX")]).unwrap();
        let err = MemoryStandard::new(standard("TEST"), vec![code]).unwrap_err();
        assert!(matches!(err, StandardsError::ForeignEntry { .. }));
    }

    #[test]
    fn duplicate_values_are_kept() {
        let memory = MemoryStandard::from_records(
            standard("TEST"),
            [("First", [(ALPHA_2, "XX")]), ("Second", [(ALPHA_2, "XX")])],
        )
        .unwrap();
        assert_eq!(memory.entries().unwrap().len(), 2);
    }
}
