//! Country code entries.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::standard::StandardInfo;

/// A set of country codes, ordered by standard, name and formats.
pub type CodeSet = BTreeSet<Arc<CountryCode>>;

/// One territory's record within one standard.
///
/// Entries are immutable once built. The format keys are checked against the
/// owning standard's format names at construction time.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use country_model::{ALPHA_2, CountryCode, StandardInfo};
///
/// let fips = Arc::new(
///     StandardInfo::new("FIPS", Some("2014"), NaiveDate::from_ymd_opt(2014, 9, 30).unwrap(), [ALPHA_2])
///         .unwrap(),
/// );
/// let code = CountryCode::new(fips, "Gaza Strip", [(ALPHA_2, "GZ")]).unwrap();
/// assert_eq!(code.format(ALPHA_2), Some("GZ"));
/// assert!(CountryCode::new(code.standard().clone(), "Nowhere", [("alpha3", "XXX")]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CountryCode {
    #[serde(serialize_with = "serialize_standard")]
    standard: Arc<StandardInfo>,
    name: String,
    formats: BTreeMap<String, String>,
}

impl CountryCode {
    /// Build an entry from its complete set of format values.
    ///
    /// Fails when the name is blank or a format is not declared by `standard`.
    pub fn new<I, K, V>(standard: Arc<StandardInfo>, name: impl Into<String>, formats: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyName {
                standard: standard.to_string(),
            });
        }

        let mut values = BTreeMap::new();
        for (format, value) in formats {
            let format = format.into();
            if !standard.supports_format(&format) {
                return Err(ModelError::UnknownFormat {
                    standard: standard.to_string(),
                    format,
                });
            }
            values.insert(format, value.into());
        }

        Ok(Self {
            standard,
            name,
            formats: values,
        })
    }

    pub fn standard(&self) -> &Arc<StandardInfo> {
        &self.standard
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of this entry in `format`, if it has one.
    pub fn format(&self, format: &str) -> Option<&str> {
        self.formats.get(format).map(String::as_str)
    }

    pub fn formats(&self) -> &BTreeMap<String, String> {
        &self.formats
    }

    pub fn belongs_to(&self, standard: &StandardInfo) -> bool {
        self.standard.as_ref() == standard
    }

    /// Whether any of this entry's formats has exactly `value`.
    pub fn has_value(&self, value: &str) -> bool {
        self.formats.values().any(|v| v == value)
    }
}

fn serialize_standard<S: serde::Serializer>(
    standard: &Arc<StandardInfo>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(standard.as_ref())
}
